use uuid::Uuid;

/// Insert shape for a public submission. The publish flag is not part of
/// this struct: new submissions always start unpublished.
pub struct SubmissionCreate {
    pub form_id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub rating: Option<i32>,
    pub content: String,
    pub custom_fields: Option<String>,
}

/// Column-level changes of a submission patch. A submission patch never
/// touches the parent form row.
#[derive(Debug, Default)]
pub struct SubmissionChanges {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub company: Option<Option<String>>,
    pub role: Option<Option<String>>,
    pub rating: Option<Option<i32>>,
    pub content: Option<String>,
    pub custom_fields: Option<Option<String>>,
    pub published: Option<String>,
}

impl SubmissionChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.company.is_none()
            && self.role.is_none()
            && self.rating.is_none()
            && self.content.is_none()
            && self.custom_fields.is_none()
            && self.published.is_none()
    }
}
