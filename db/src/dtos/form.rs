use uuid::Uuid;

pub struct FormCreate {
    pub project_id: Uuid,
    pub embed_key: String,
    pub form_config: Option<String>,
}

/// Column-level changes of a form patch. The content columns are patchable
/// alongside the form configuration because legacy combined rows carry
/// real testimonial content in the form row itself.
#[derive(Debug, Default)]
pub struct FormChanges {
    pub form_config: Option<Option<String>>,
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub company: Option<Option<String>>,
    pub role: Option<Option<String>>,
    pub rating: Option<Option<i32>>,
    pub content: Option<Option<String>>,
    pub custom_fields: Option<Option<String>>,
    pub published: Option<String>,
}

impl FormChanges {
    pub fn is_empty(&self) -> bool {
        self.form_config.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.company.is_none()
            && self.role.is_none()
            && self.rating.is_none()
            && self.content.is_none()
            && self.custom_fields.is_none()
            && self.published.is_none()
    }
}
