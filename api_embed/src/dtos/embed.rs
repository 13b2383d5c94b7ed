use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The public descriptor of a form: just enough for the embed renderer,
/// none of the content columns.
#[derive(Debug, Serialize)]
pub struct PublicFormResponse {
    pub id: Uuid,
    pub embed_key: String,
    pub form_config: Option<Value>,
}

/// Body of a public testimonial submission. Every field is optional at
/// the deserialization layer so that missing required ones surface as
/// field-level validation errors instead of a generic parse failure.
/// There is deliberately no `published` field; submissions always start
/// unpublished.
#[derive(Debug, Deserialize)]
pub struct PublicSubmissionRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub custom_fields: Option<Value>,
}
