use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use common::patch::Patch;

#[derive(Debug, Deserialize)]
pub struct CreateFormRequest {
    pub project_id: Uuid,
    #[serde(default)]
    pub form_config: Option<Value>,
}

/// Partial patch body for a form. Covers the form configuration and,
/// because legacy combined rows keep real testimonial content in the form
/// row, the shared content columns as well.
#[derive(Debug, Deserialize)]
pub struct UpdateFormRequest {
    #[serde(default)]
    pub form_config: Patch<Value>,
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
