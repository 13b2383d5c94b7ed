use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    dtos::submission::{SubmissionChanges, SubmissionCreate},
    models::submission::{Submission, SubmissionWithForm},
};

/// Inserts a genuine submission. The publish flag is hardcoded to the
/// unpublished state regardless of what the submitter sent.
pub async fn insert_submission<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: SubmissionCreate,
) -> Res<Submission> {
    sqlx::query_as::<_, Submission>(
        r#"
        INSERT INTO testimonial_submissions
            (form_id, project_id, name, email, company, role, rating, content, custom_fields, published)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'false')
        RETURNING *
        "#,
    )
    .bind(data.form_id)
    .bind(data.project_id)
    .bind(data.name)
    .bind(data.email)
    .bind(data.company)
    .bind(data.role)
    .bind(data.rating)
    .bind(data.content)
    .bind(data.custom_fields)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Resolves a submission only when the caller belongs to the organization
/// that owns the submission's project.
pub async fn get_submission_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    submission_id: Uuid,
    caller: &str,
) -> Res<Option<Submission>> {
    sqlx::query_as::<_, Submission>(
        r#"
        SELECT s.*
        FROM testimonial_submissions s
        JOIN projects p ON p.id = s.project_id
        JOIN organization_memberships m ON m.organization_id = p.organization_id
        JOIN users u ON u.id = m.user_id
        WHERE s.id = $1 AND u.external_id = $2
        "#,
    )
    .bind(submission_id)
    .bind(caller)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// A submission joined with its parent form's embed key and configuration.
pub async fn get_submission_with_form<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    submission_id: Uuid,
) -> Res<Option<SubmissionWithForm>> {
    sqlx::query_as::<_, SubmissionWithForm>(
        r#"
        SELECT s.*, f.embed_key AS form_embed_key, f.form_config
        FROM testimonial_submissions s
        JOIN testimonial_forms f ON f.id = s.form_id
        WHERE s.id = $1
        "#,
    )
    .bind(submission_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_for_forms<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    form_ids: Vec<Uuid>,
) -> Res<Vec<Submission>> {
    sqlx::query_as::<_, Submission>(
        "SELECT * FROM testimonial_submissions WHERE form_id = ANY($1) ORDER BY created_at DESC",
    )
    .bind(form_ids)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// All published submissions of the project addressed by its public embed
/// key, newest-first, each joined with its parent form's public identity.
pub async fn list_published_for_project_key<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    project_embed_key: &str,
) -> Res<Vec<SubmissionWithForm>> {
    sqlx::query_as::<_, SubmissionWithForm>(
        r#"
        SELECT s.*, f.embed_key AS form_embed_key, f.form_config
        FROM testimonial_submissions s
        JOIN testimonial_forms f ON f.id = s.form_id
        JOIN projects p ON p.id = s.project_id
        WHERE p.embed_key = $1 AND s.published = 'true'
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(project_embed_key)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_submission<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    submission_id: Uuid,
    changes: SubmissionChanges,
) -> Res<Submission> {
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE testimonial_submissions SET ");
    {
        let mut set = qb.separated(", ");
        if let Some(name) = changes.name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(email) = changes.email {
            set.push("email = ").push_bind_unseparated(email);
        }
        if let Some(company) = changes.company {
            set.push("company = ").push_bind_unseparated(company);
        }
        if let Some(role) = changes.role {
            set.push("role = ").push_bind_unseparated(role);
        }
        if let Some(rating) = changes.rating {
            set.push("rating = ").push_bind_unseparated(rating);
        }
        if let Some(content) = changes.content {
            set.push("content = ").push_bind_unseparated(content);
        }
        if let Some(custom_fields) = changes.custom_fields {
            set.push("custom_fields = ")
                .push_bind_unseparated(custom_fields);
        }
        if let Some(published) = changes.published {
            set.push("published = ").push_bind_unseparated(published);
        }
    }
    qb.push(" WHERE id = ");
    qb.push_bind(submission_id);
    qb.push(" RETURNING *");

    qb.build_query_as::<Submission>()
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn delete_submission<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    submission_id: Uuid,
) -> Res<u64> {
    sqlx::query("DELETE FROM testimonial_submissions WHERE id = $1")
        .bind(submission_id)
        .execute(executor)
        .await
        .map(|done| done.rows_affected())
        .map_err(AppError::from)
}
