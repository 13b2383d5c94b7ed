use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{AppError, Res};

type HmacSha256 = Hmac<Sha256>;

/// The three headers Clerk (svix) sends with every webhook delivery.
pub struct WebhookHeaders<'a> {
    pub id: &'a str,
    pub timestamp: &'a str,
    pub signature: &'a str,
}

/// Verifies a webhook delivery against the endpoint signing secret.
///
/// The signed content is `{id}.{timestamp}.{payload}`, the key is the
/// base64 payload of the secret after its `whsec_` prefix, and the
/// signature header carries one or more space-separated `v1,<base64>`
/// candidates of which any one may match.
pub fn verify_signature(secret: &str, headers: &WebhookHeaders, payload: &str) -> Res<()> {
    let encoded_secret = secret.strip_prefix("whsec_").unwrap_or(secret);
    let key = general_purpose::STANDARD
        .decode(encoded_secret)
        .map_err(|e| AppError::Internal(format!("Malformed webhook secret: {}", e)))?;

    let signed_content = format!("{}.{}.{}", headers.id, headers.timestamp, payload);

    for candidate in headers.signature.split_whitespace() {
        let Some(sig) = candidate.strip_prefix("v1,") else {
            continue;
        };
        let Ok(sig_bytes) = general_purpose::STANDARD.decode(sig) else {
            continue;
        };
        let mut mac = HmacSha256::new_from_slice(&key)
            .map_err(|e| AppError::Internal(format!("HMAC init failed: {}", e)))?;
        mac.update(signed_content.as_bytes());
        if mac.verify_slice(&sig_bytes).is_ok() {
            return Ok(());
        }
    }

    Err(AppError::Unauthorized(
        "Webhook signature verification failed".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";

    fn sign(secret: &str, id: &str, timestamp: &str, payload: &str) -> String {
        let encoded_secret = secret.strip_prefix("whsec_").unwrap();
        let key = general_purpose::STANDARD.decode(encoded_secret).unwrap();
        let mut mac = HmacSha256::new_from_slice(&key).unwrap();
        mac.update(format!("{}.{}.{}", id, timestamp, payload).as_bytes());
        let digest = mac.finalize().into_bytes();
        format!("v1,{}", general_purpose::STANDARD.encode(digest))
    }

    #[test]
    fn accepts_valid_signature() {
        let payload = r#"{"type":"user.created","data":{"id":"user_1"}}"#;
        let signature = sign(SECRET, "msg_1", "1700000000", payload);
        let headers = WebhookHeaders {
            id: "msg_1",
            timestamp: "1700000000",
            signature: &signature,
        };
        assert!(verify_signature(SECRET, &headers, payload).is_ok());
    }

    #[test]
    fn accepts_any_matching_candidate() {
        let payload = "{}";
        let good = sign(SECRET, "msg_2", "1700000000", payload);
        let combined = format!("v1,bm90LXRoZS1zaWduYXR1cmU= {}", good);
        let headers = WebhookHeaders {
            id: "msg_2",
            timestamp: "1700000000",
            signature: &combined,
        };
        assert!(verify_signature(SECRET, &headers, payload).is_ok());
    }

    #[test]
    fn rejects_tampered_payload() {
        let signature = sign(SECRET, "msg_3", "1700000000", r#"{"a":1}"#);
        let headers = WebhookHeaders {
            id: "msg_3",
            timestamp: "1700000000",
            signature: &signature,
        };
        assert!(verify_signature(SECRET, &headers, r#"{"a":2}"#).is_err());
    }

    #[test]
    fn rejects_wrong_secret() {
        let payload = "{}";
        let signature = sign(SECRET, "msg_4", "1700000000", payload);
        let headers = WebhookHeaders {
            id: "msg_4",
            timestamp: "1700000000",
            signature: &signature,
        };
        let other = "whsec_d2hvbGx5LWRpZmZlcmVudC1zZWNyZXQ=";
        assert!(verify_signature(other, &headers, payload).is_err());
    }

    #[test]
    fn rejects_malformed_signature_header() {
        let headers = WebhookHeaders {
            id: "msg_5",
            timestamp: "1700000000",
            signature: "v2,abc not-a-signature",
        };
        assert!(verify_signature(SECRET, &headers, "{}").is_err());
    }
}
