use serde::Deserialize;
use serde_json::Value;

/// Envelope of an identity-provider webhook delivery. The payload shape
/// depends on the event type, so `data` stays untyped until dispatch.
#[derive(Debug, Deserialize)]
pub struct ClerkEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub struct ClerkEmailAddress {
    pub id: String,
    pub email_address: String,
}

#[derive(Debug, Deserialize)]
pub struct ClerkUserData {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<ClerkEmailAddress>,
    #[serde(default)]
    pub primary_email_address_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ClerkUserData {
    /// The address referenced by `primary_email_address_id` when present,
    /// the first listed address otherwise.
    pub fn primary_email(&self) -> Option<String> {
        self.primary_email_address_id
            .as_ref()
            .and_then(|pid| self.email_addresses.iter().find(|e| &e.id == pid))
            .or_else(|| self.email_addresses.first())
            .map(|e| e.email_address.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct ClerkDeletedUser {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_email_prefers_the_referenced_address() {
        let data: ClerkUserData = serde_json::from_str(
            r#"{
                "id": "user_1",
                "email_addresses": [
                    {"id": "em_1", "email_address": "old@example.com"},
                    {"id": "em_2", "email_address": "primary@example.com"}
                ],
                "primary_email_address_id": "em_2"
            }"#,
        )
        .unwrap();
        assert_eq!(data.primary_email().unwrap(), "primary@example.com");
    }

    #[test]
    fn primary_email_falls_back_to_first_address() {
        let data: ClerkUserData = serde_json::from_str(
            r#"{
                "id": "user_1",
                "email_addresses": [
                    {"id": "em_1", "email_address": "only@example.com"}
                ],
                "primary_email_address_id": "em_missing"
            }"#,
        )
        .unwrap();
        assert_eq!(data.primary_email().unwrap(), "only@example.com");
    }

    #[test]
    fn primary_email_is_none_without_addresses() {
        let data: ClerkUserData = serde_json::from_str(r#"{"id": "user_1"}"#).unwrap();
        assert!(data.primary_email().is_none());
    }
}
