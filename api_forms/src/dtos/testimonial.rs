use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use common::patch::Patch;

/// One entry of a project's testimonial feed. Forms and submissions share
/// one underlying content shape, so the list is a tagged union rather than
/// two parallel collections.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedEntry {
    Form(FormEntry),
    Submission(SubmissionEntry),
}

#[derive(Debug, Serialize)]
pub struct FormEntry {
    pub id: Uuid,
    pub project_id: Uuid,
    pub embed_key: String,
    pub form_config: Option<Value>,
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub rating: Option<i32>,
    pub content: Option<String>,
    pub custom_fields: Option<Value>,
    pub published: bool,
    pub created_at: NaiveDateTime,
}

/// A submission as emitted to the dashboard or an embed. Its public
/// identity (embed key, form configuration) is inherited from the parent
/// form; the publish flag is normalized from its textual storage form.
#[derive(Debug, Serialize)]
pub struct SubmissionEntry {
    pub id: Uuid,
    pub form_id: Uuid,
    pub project_id: Uuid,
    pub embed_key: String,
    pub form_config: Option<Value>,
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub rating: Option<i32>,
    pub content: Option<String>,
    pub custom_fields: Option<Value>,
    pub published: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub project_id: Uuid,
}

/// Partial patch body for a submission. Absent fields stay untouched,
/// explicit nulls clear the optional ones. Toggling publication is just
/// this request with only `published` set.
#[derive(Debug, Deserialize)]
pub struct UpdateSubmissionRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub company: Patch<String>,
    #[serde(default)]
    pub role: Patch<String>,
    #[serde(default)]
    pub rating: Patch<i32>,
    #[serde(default)]
    pub content: Patch<String>,
    #[serde(default)]
    pub custom_fields: Patch<Value>,
    #[serde(default)]
    pub published: Patch<bool>,
}
