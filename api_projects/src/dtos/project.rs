use serde::Deserialize;
use uuid::Uuid;

use common::patch::Patch;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub organization_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub organization_id: Uuid,
}

/// Partial patch body. Absent fields stay untouched; `domain` accepts an
/// explicit null to clear it.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub domain: Patch<String>,
}
