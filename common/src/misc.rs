use rand::{Rng, distr::Alphanumeric};

use crate::error::{AppError, Res};

/// Length of public embed keys (projects and forms draw from the same
/// alphabet but live in separate unique columns).
const EMBED_KEY_LEN: usize = 20;

/// Generates an opaque token for addressing a project or form from
/// public, unauthenticated contexts. Uniqueness is enforced by the
/// database constraint, not here.
pub fn generate_embed_key() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(EMBED_KEY_LEN)
        .map(char::from)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrgRole {
    Owner,
    Admin,
    Member,
}

impl OrgRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgRole::Owner => "owner",
            OrgRole::Admin => "admin",
            OrgRole::Member => "member",
        }
    }

    pub fn from_str(value: &str) -> Res<Self> {
        match value {
            "owner" => Ok(OrgRole::Owner),
            "admin" => Ok(OrgRole::Admin),
            "member" => Ok(OrgRole::Member),
            other => Err(AppError::validation(
                "role",
                &format!("'{}' is not one of owner, admin, member", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_keys_are_opaque_tokens() {
        let key = generate_embed_key();
        assert_eq!(key.len(), EMBED_KEY_LEN);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(key, generate_embed_key());
    }

    #[test]
    fn role_round_trip() {
        for role in [OrgRole::Owner, OrgRole::Admin, OrgRole::Member] {
            assert_eq!(OrgRole::from_str(role.as_str()).unwrap(), role);
        }
        assert!(OrgRole::from_str("superuser").is_err());
    }
}
