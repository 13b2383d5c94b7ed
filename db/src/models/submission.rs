use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub form_id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub rating: Option<i32>,
    pub content: Option<String>,
    pub custom_fields: Option<String>,
    pub published: String,
    pub created_at: NaiveDateTime,
}

/// A submission joined with its parent form's public identity.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SubmissionWithForm {
    pub id: Uuid,
    pub form_id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub rating: Option<i32>,
    pub content: Option<String>,
    pub custom_fields: Option<String>,
    pub published: String,
    pub created_at: NaiveDateTime,
    pub form_embed_key: String,
    pub form_config: Option<String>,
}
