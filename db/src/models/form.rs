use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

/// A testimonial-collection form.
///
/// Besides its template state (embed key, serialized form configuration)
/// the row carries the full set of testimonial content columns. Rows whose
/// content columns hold real data are legacy combined template+submission
/// rows; see the feed reconciliation in `api_forms`.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct TestimonialForm {
    pub id: Uuid,
    pub project_id: Uuid,
    pub embed_key: String,
    pub form_config: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub rating: Option<i32>,
    pub content: Option<String>,
    pub custom_fields: Option<String>,
    pub published: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
