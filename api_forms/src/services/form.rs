use common::{
    error::{AppError, Res},
    jwt::SessionClaims,
    misc::generate_embed_key,
};
use db::dtos::form::{FormChanges, FormCreate};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::{
        form::{CreateFormRequest, UpdateFormRequest},
        testimonial::FormEntry,
    },
    services::feed,
};

fn check_rating(rating: Option<&i32>) -> Res<()> {
    if let Some(rating) = rating {
        if !(1..=5).contains(rating) {
            return Err(AppError::validation("rating", "must be between 1 and 5"));
        }
    }
    Ok(())
}

/// Creates a pure template row with placeholder content and a fresh embed
/// key.
pub async fn create_form(
    pool: &PgPool,
    claims: &SessionClaims,
    req: CreateFormRequest,
) -> Res<FormEntry> {
    let project = db::project::get_project_for_user(pool, req.project_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;

    let form = db::form::insert_form(
        pool,
        FormCreate {
            project_id: project.id,
            embed_key: generate_embed_key(),
            form_config: req.form_config.map(|config| config.to_string()),
        },
    )
    .await?;

    Ok(feed::form_entry(&form))
}

pub async fn get_form(pool: &PgPool, claims: &SessionClaims, form_id: Uuid) -> Res<FormEntry> {
    let form = db::form::get_form_for_user(pool, form_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(feed::form_entry(&form))
}

/// Applies a partial patch to a form row. Submissions are never touched
/// from here, whatever the patch contains.
pub async fn update_form(
    pool: &PgPool,
    claims: &SessionClaims,
    form_id: Uuid,
    req: UpdateFormRequest,
) -> Res<FormEntry> {
    let form = db::form::get_form_for_user(pool, form_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;

    let changes = form_changes(req)?;
    if changes.is_empty() {
        return Ok(feed::form_entry(&form));
    }

    let updated = db::form::update_form(pool, form.id, changes).await?;
    Ok(feed::form_entry(&updated))
}

pub async fn delete_form(pool: &PgPool, claims: &SessionClaims, form_id: Uuid) -> Res<Uuid> {
    let form = db::form::get_form_for_user(pool, form_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;
    db::form::delete_form(pool, form.id).await?;
    Ok(form.id)
}

fn form_changes(req: UpdateFormRequest) -> Res<FormChanges> {
    let name = req.name.into_required("name")?;
    if let Some(name) = &name {
        if name.trim().is_empty() {
            return Err(AppError::validation("name", "must not be empty"));
        }
    }
    let rating = req.rating.into_nullable();
    if let Some(rating) = &rating {
        check_rating(rating.as_ref())?;
    }

    Ok(FormChanges {
        form_config: req
            .form_config
            .into_nullable()
            .map(|config| config.map(|value| value.to_string())),
        name,
        email: req.email.into_nullable(),
        company: req.company.into_nullable(),
        role: req.role.into_nullable(),
        rating,
        content: req.content.into_nullable(),
        custom_fields: req
            .custom_fields
            .into_nullable()
            .map(|fields| fields.map(|value| value.to_string())),
        published: req
            .published
            .into_required("published")?
            .map(|published| published.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::patch::Patch;

    fn empty_request() -> UpdateFormRequest {
        serde_json::from_str("{}").unwrap()
    }

    #[test]
    fn empty_patch_produces_no_changes() {
        let changes = form_changes(empty_request()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn publish_toggle_is_a_one_field_patch() {
        let req: UpdateFormRequest = serde_json::from_str(r#"{"published": true}"#).unwrap();
        let changes = form_changes(req).unwrap();
        assert_eq!(changes.published, Some("true".to_string()));
        assert!(changes.name.is_none());
        assert!(changes.form_config.is_none());
    }

    #[test]
    fn null_clears_the_form_config() {
        let req: UpdateFormRequest = serde_json::from_str(r#"{"form_config": null}"#).unwrap();
        let changes = form_changes(req).unwrap();
        assert_eq!(changes.form_config, Some(None));
    }

    #[test]
    fn null_on_required_fields_is_rejected() {
        let mut req = empty_request();
        req.name = Patch::Null;
        assert!(form_changes(req).is_err());

        let mut req = empty_request();
        req.published = Patch::Null;
        assert!(form_changes(req).is_err());
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let req: UpdateFormRequest = serde_json::from_str(r#"{"rating": 9}"#).unwrap();
        assert!(form_changes(req).is_err());
    }
}
