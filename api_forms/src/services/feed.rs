use std::collections::HashMap;

use common::{
    error::{AppError, Res},
    jwt::SessionClaims,
};
use db::models::{
    form::TestimonialForm,
    submission::{Submission, SubmissionWithForm},
};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::testimonial::{FeedEntry, FormEntry, SubmissionEntry};

/// Content-column name a freshly created form starts with.
pub const PLACEHOLDER_NAME: &str = "Untitled Testimonial";

/// Parses a stored document blob (form configuration or custom fields).
/// Missing, empty and unparseable blobs all read as "no value"; the feed
/// never substitutes an empty object for them.
pub fn parse_document(raw: Option<&str>) -> Option<Value> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    serde_json::from_str(raw).ok()
}

/// The publish flag is stored as the text "true"/"false"; only the exact
/// "true" reads as published.
pub fn published_flag(stored: &str) -> bool {
    stored == "true"
}

/// Whether a form row carries real testimonial content, i.e. predates the
/// split submissions table. Placeholder name or empty body means the row
/// is a pure template.
fn has_legacy_content(form: &TestimonialForm) -> bool {
    form.name != PLACEHOLDER_NAME
        && form
            .content
            .as_deref()
            .is_some_and(|body| !body.trim().is_empty())
}

pub fn form_entry(form: &TestimonialForm) -> FormEntry {
    FormEntry {
        id: form.id,
        project_id: form.project_id,
        embed_key: form.embed_key.clone(),
        form_config: parse_document(form.form_config.as_deref()),
        name: form.name.clone(),
        email: form.email.clone(),
        company: form.company.clone(),
        role: form.role.clone(),
        rating: form.rating,
        content: form.content.clone(),
        custom_fields: parse_document(form.custom_fields.as_deref()),
        published: published_flag(&form.published),
        created_at: form.created_at,
    }
}

/// The synthetic submission a legacy combined row contributes, pointing at
/// its own form id.
fn legacy_submission_entry(form: &TestimonialForm) -> SubmissionEntry {
    SubmissionEntry {
        id: form.id,
        form_id: form.id,
        project_id: form.project_id,
        embed_key: form.embed_key.clone(),
        form_config: parse_document(form.form_config.as_deref()),
        name: form.name.clone(),
        email: form.email.clone(),
        company: form.company.clone(),
        role: form.role.clone(),
        rating: form.rating,
        content: form.content.clone(),
        custom_fields: parse_document(form.custom_fields.as_deref()),
        published: published_flag(&form.published),
        created_at: form.created_at,
    }
}

pub fn submission_entry(
    sub: &Submission,
    embed_key: &str,
    form_config: Option<&str>,
) -> SubmissionEntry {
    SubmissionEntry {
        id: sub.id,
        form_id: sub.form_id,
        project_id: sub.project_id,
        embed_key: embed_key.to_string(),
        form_config: parse_document(form_config),
        name: sub.name.clone(),
        email: sub.email.clone(),
        company: sub.company.clone(),
        role: sub.role.clone(),
        rating: sub.rating,
        content: sub.content.clone(),
        custom_fields: parse_document(sub.custom_fields.as_deref()),
        published: published_flag(&sub.published),
        created_at: sub.created_at,
    }
}

pub fn submission_entry_with_form(row: &SubmissionWithForm) -> SubmissionEntry {
    SubmissionEntry {
        id: row.id,
        form_id: row.form_id,
        project_id: row.project_id,
        embed_key: row.form_embed_key.clone(),
        form_config: parse_document(row.form_config.as_deref()),
        name: row.name.clone(),
        email: row.email.clone(),
        company: row.company.clone(),
        role: row.role.clone(),
        rating: row.rating,
        content: row.content.clone(),
        custom_fields: parse_document(row.custom_fields.as_deref()),
        published: published_flag(&row.published),
        created_at: row.created_at,
    }
}

/// Flattens a project's forms and their collected submissions into one
/// ordered list.
///
/// Both inputs arrive newest-first. Each form is emitted, followed by its
/// synthetic legacy submission when the row qualifies, followed by its
/// genuine submissions. Submissions stay grouped under their form rather
/// than being time-sorted across the whole project.
///
/// A legacy combined row is only duplicated when at least one genuine
/// submission corroborates the content heuristic; real-looking content
/// alone is not trusted.
pub fn build_feed(forms: Vec<TestimonialForm>, submissions: Vec<Submission>) -> Vec<FeedEntry> {
    let mut by_form: HashMap<Uuid, Vec<Submission>> = HashMap::new();
    for sub in submissions {
        by_form.entry(sub.form_id).or_default().push(sub);
    }

    let mut entries = Vec::new();
    for form in forms {
        let collected = by_form.remove(&form.id).unwrap_or_default();

        entries.push(FeedEntry::Form(form_entry(&form)));
        if has_legacy_content(&form) && !collected.is_empty() {
            entries.push(FeedEntry::Submission(legacy_submission_entry(&form)));
        }
        for sub in &collected {
            entries.push(FeedEntry::Submission(submission_entry(
                sub,
                &form.embed_key,
                form.form_config.as_deref(),
            )));
        }
    }
    entries
}

/// The reconciled feed of one project, access-checked.
pub async fn project_feed(
    pool: &PgPool,
    claims: &SessionClaims,
    project_id: Uuid,
) -> Res<Vec<FeedEntry>> {
    let project = db::project::get_project_for_user(pool, project_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;

    let forms = db::form::list_forms_for_project(pool, project.id).await?;
    let form_ids: Vec<Uuid> = forms.iter().map(|f| f.id).collect();
    let submissions = db::submission::list_for_forms(pool, form_ids).await?;

    Ok(build_feed(forms, submissions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn template_form(day: u32) -> TestimonialForm {
        TestimonialForm {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            embed_key: format!("form-key-{}", day),
            form_config: None,
            name: PLACEHOLDER_NAME.to_string(),
            email: None,
            company: None,
            role: None,
            rating: None,
            content: None,
            custom_fields: None,
            published: "false".to_string(),
            created_at: at(day),
            updated_at: at(day),
        }
    }

    fn legacy_form(day: u32) -> TestimonialForm {
        TestimonialForm {
            name: "Grace Hopper".to_string(),
            content: Some("Saved us weeks of work.".to_string()),
            rating: Some(5),
            published: "true".to_string(),
            ..template_form(day)
        }
    }

    fn submission_for(form: &TestimonialForm, day: u32) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            form_id: form.id,
            project_id: form.project_id,
            name: "Alan Turing".to_string(),
            email: Some("alan@example.com".to_string()),
            company: None,
            role: None,
            rating: Some(4),
            content: Some("Setup took five minutes.".to_string()),
            custom_fields: None,
            published: "false".to_string(),
            created_at: at(day),
        }
    }

    fn kinds(entries: &[FeedEntry]) -> Vec<&'static str> {
        entries
            .iter()
            .map(|e| match e {
                FeedEntry::Form(_) => "form",
                FeedEntry::Submission(_) => "submission",
            })
            .collect()
    }

    #[test]
    fn pure_template_emits_one_entry() {
        let feed = build_feed(vec![template_form(1)], vec![]);
        assert_eq!(kinds(&feed), vec!["form"]);
    }

    #[test]
    fn legacy_row_with_submissions_is_duplicated() {
        let form = legacy_form(1);
        let subs = vec![submission_for(&form, 2), submission_for(&form, 3)];
        let feed = build_feed(vec![form.clone()], subs);

        // form, synthetic self-referencing submission, then the two genuine ones
        assert_eq!(kinds(&feed), vec!["form", "submission", "submission", "submission"]);
        match &feed[1] {
            FeedEntry::Submission(entry) => {
                assert_eq!(entry.id, form.id);
                assert_eq!(entry.form_id, form.id);
                assert_eq!(entry.name, "Grace Hopper");
            }
            other => panic!("expected synthetic submission, got {:?}", other),
        }
    }

    #[test]
    fn legacy_row_without_submissions_is_not_duplicated() {
        let feed = build_feed(vec![legacy_form(1)], vec![]);
        assert_eq!(kinds(&feed), vec!["form"]);
    }

    #[test]
    fn placeholder_row_with_submissions_is_not_duplicated() {
        let form = template_form(1);
        let subs = vec![submission_for(&form, 2)];
        let feed = build_feed(vec![form], subs);
        assert_eq!(kinds(&feed), vec!["form", "submission"]);
    }

    #[test]
    fn empty_body_disqualifies_legacy_content() {
        let mut form = legacy_form(1);
        form.content = Some("   ".to_string());
        let subs = vec![submission_for(&form, 2)];
        let feed = build_feed(vec![form], subs);
        assert_eq!(kinds(&feed), vec!["form", "submission"]);
    }

    #[test]
    fn submissions_stay_grouped_under_their_form() {
        // newest form first; its submission is older than the other form's
        let new_form = template_form(5);
        let old_form = template_form(1);
        let new_form_sub = submission_for(&new_form, 2);
        let old_form_sub = submission_for(&old_form, 9);

        let feed = build_feed(
            vec![new_form.clone(), old_form.clone()],
            vec![old_form_sub, new_form_sub],
        );

        assert_eq!(kinds(&feed), vec!["form", "submission", "form", "submission"]);
        match (&feed[0], &feed[1]) {
            (FeedEntry::Form(f), FeedEntry::Submission(s)) => {
                assert_eq!(f.id, new_form.id);
                assert_eq!(s.form_id, new_form.id);
            }
            _ => panic!("unexpected feed shape"),
        }
    }

    #[test]
    fn submissions_inherit_the_parent_forms_public_identity() {
        let mut form = template_form(1);
        form.form_config = Some(r#"{"fields":["name","content"]}"#.to_string());
        let sub = submission_for(&form, 2);
        let feed = build_feed(vec![form.clone()], vec![sub]);

        match &feed[1] {
            FeedEntry::Submission(entry) => {
                assert_eq!(entry.embed_key, form.embed_key);
                assert_eq!(
                    entry.form_config,
                    Some(serde_json::json!({"fields": ["name", "content"]}))
                );
            }
            other => panic!("expected submission, got {:?}", other),
        }
    }

    #[test]
    fn publish_flag_is_normalized_to_a_boolean() {
        let form = legacy_form(1);
        let mut sub = submission_for(&form, 2);
        sub.published = "true".to_string();
        let feed = build_feed(vec![form], vec![sub]);

        match (&feed[0], &feed[2]) {
            (FeedEntry::Form(f), FeedEntry::Submission(s)) => {
                assert!(f.published);
                assert!(s.published);
            }
            _ => panic!("unexpected feed shape"),
        }
    }

    #[test]
    fn only_the_exact_true_text_reads_as_published() {
        assert!(published_flag("true"));
        assert!(!published_flag("false"));
        assert!(!published_flag("TRUE"));
        assert!(!published_flag(""));
    }

    #[test]
    fn documents_parse_to_explicit_no_value() {
        assert_eq!(parse_document(None), None);
        assert_eq!(parse_document(Some("")), None);
        assert_eq!(parse_document(Some("   ")), None);
        assert_eq!(parse_document(Some("{not json")), None);
        assert_eq!(
            parse_document(Some(r#"{"title":"Share your story"}"#)),
            Some(serde_json::json!({"title": "Share your story"}))
        );
    }
}
