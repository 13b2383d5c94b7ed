use uuid::Uuid;

pub struct ProjectCreate {
    pub organization_id: Uuid,
    pub name: String,
    pub domain: Option<String>,
    pub embed_key: String,
}

/// Column-level changes of a project patch. `None` leaves the column
/// untouched; the nested `Option` distinguishes SQL NULL from a value.
#[derive(Debug, Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub domain: Option<Option<String>>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.domain.is_none()
    }
}
