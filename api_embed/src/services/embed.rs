use api_forms::{dtos::testimonial::SubmissionEntry, services::feed};
use common::error::{AppError, Res};
use db::dtos::submission::SubmissionCreate;
use sqlx::PgPool;

use crate::dtos::embed::{PublicFormResponse, PublicSubmissionRequest};

pub async fn fetch_form(pool: &PgPool, embed_key: &str) -> Res<PublicFormResponse> {
    let form = db::form::get_form_by_embed_key(pool, embed_key)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(PublicFormResponse {
        id: form.id,
        embed_key: form.embed_key,
        form_config: feed::parse_document(form.form_config.as_deref()),
    })
}

/// Ingests a public submission through a form's embed key.
///
/// The owning form is only located, never mutated; the new row lands in
/// the submissions table referencing the form and its project. An
/// unresolvable key fails before anything is written.
pub async fn submit(
    pool: &PgPool,
    embed_key: &str,
    req: PublicSubmissionRequest,
) -> Res<SubmissionEntry> {
    let name = req
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::validation("name", "is required"))?;
    let content = req
        .content
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| AppError::validation("content", "is required"))?;
    if let Some(rating) = req.rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError::validation("rating", "must be between 1 and 5"));
        }
    }

    let form = db::form::get_form_by_embed_key(pool, embed_key)
        .await?
        .ok_or(AppError::NotFound)?;

    let submission = db::submission::insert_submission(
        pool,
        SubmissionCreate {
            form_id: form.id,
            project_id: form.project_id,
            name,
            email: req.email,
            company: req.company,
            role: req.role,
            rating: req.rating,
            content,
            custom_fields: req.custom_fields.map(|fields| fields.to_string()),
        },
    )
    .await?;

    Ok(feed::submission_entry(
        &submission,
        &form.embed_key,
        form.form_config.as_deref(),
    ))
}

/// The published testimonials of a project, addressed by the project's
/// own embed key. Backs the public wall-of-love embed.
pub async fn published_wall(pool: &PgPool, embed_key: &str) -> Res<Vec<SubmissionEntry>> {
    let project = db::project::get_project_by_embed_key(pool, embed_key)
        .await?
        .ok_or(AppError::NotFound)?;

    let rows = db::submission::list_published_for_project_key(pool, &project.embed_key).await?;
    Ok(rows.iter().map(feed::submission_entry_with_form).collect())
}
