use common::{
    error::{AppError, Res},
    jwt::SessionClaims,
};
use db::dtos::submission::SubmissionChanges;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::testimonial::{SubmissionEntry, UpdateSubmissionRequest},
    services::feed,
};

pub async fn get_submission(
    pool: &PgPool,
    claims: &SessionClaims,
    submission_id: Uuid,
) -> Res<SubmissionEntry> {
    let submission = db::submission::get_submission_for_user(pool, submission_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;
    let row = db::submission::get_submission_with_form(pool, submission.id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(feed::submission_entry_with_form(&row))
}

/// Applies a partial patch to a submission row. The parent form is never
/// touched from here; publishing a submission is just a one-field patch.
pub async fn update_submission(
    pool: &PgPool,
    claims: &SessionClaims,
    submission_id: Uuid,
    req: UpdateSubmissionRequest,
) -> Res<SubmissionEntry> {
    let submission = db::submission::get_submission_for_user(pool, submission_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;

    let changes = submission_changes(req)?;
    if !changes.is_empty() {
        db::submission::update_submission(pool, submission.id, changes).await?;
    }

    let row = db::submission::get_submission_with_form(pool, submission.id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(feed::submission_entry_with_form(&row))
}

pub async fn delete_submission(
    pool: &PgPool,
    claims: &SessionClaims,
    submission_id: Uuid,
) -> Res<Uuid> {
    let submission = db::submission::get_submission_for_user(pool, submission_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;
    db::submission::delete_submission(pool, submission.id).await?;
    Ok(submission.id)
}

fn submission_changes(req: UpdateSubmissionRequest) -> Res<SubmissionChanges> {
    let name = req.name.into_required("name")?;
    if let Some(name) = &name {
        if name.trim().is_empty() {
            return Err(AppError::validation("name", "must not be empty"));
        }
    }
    let content = req.content.into_required("content")?;
    if let Some(content) = &content {
        if content.trim().is_empty() {
            return Err(AppError::validation("content", "must not be empty"));
        }
    }
    let rating = req.rating.into_nullable();
    if let Some(Some(rating)) = &rating {
        if !(1..=5).contains(rating) {
            return Err(AppError::validation("rating", "must be between 1 and 5"));
        }
    }

    Ok(SubmissionChanges {
        name,
        email: req.email.into_nullable(),
        company: req.company.into_nullable(),
        role: req.role.into_nullable(),
        rating,
        content,
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

    #[test]
    fn unpublish_is_a_one_field_patch() {
        let req: UpdateSubmissionRequest =
            serde_json::from_str(r#"{"published": false}"#).unwrap();
        let changes = submission_changes(req).unwrap();
        assert_eq!(changes.published, Some("false".to_string()));
        assert!(changes.name.is_none());
        assert!(changes.content.is_none());
        assert!(changes.custom_fields.is_none());
    }

    #[test]
    fn explicit_null_clears_optional_fields_only() {
        let req: UpdateSubmissionRequest =
            serde_json::from_str(r#"{"email": null, "company": null}"#).unwrap();
        let changes = submission_changes(req).unwrap();
        assert_eq!(changes.email, Some(None));
        assert_eq!(changes.company, Some(None));

        let mut req: UpdateSubmissionRequest = serde_json::from_str("{}").unwrap();
        req.content = Patch::Null;
        assert!(submission_changes(req).is_err());
    }

    #[test]
    fn custom_fields_are_reserialized_for_storage() {
        let req: UpdateSubmissionRequest =
            serde_json::from_str(r#"{"custom_fields": {"source": "conference"}}"#).unwrap();
        let changes = submission_changes(req).unwrap();
        assert_eq!(
            changes.custom_fields,
            Some(Some(r#"{"source":"conference"}"#.to_string()))
        );
    }
}
