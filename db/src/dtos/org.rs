pub struct OrgCreate {
    pub name: String,
    pub slug: String,
}
