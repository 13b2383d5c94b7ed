use actix_web::{HttpMessage, HttpResponse, dev::ServiceRequest};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Res};

/// Claims of a Clerk session token. `sub` is the caller's Clerk user id,
/// which is also the `external_id` of the mirrored local user record.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub azp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kty: String,
    n: Option<String>,
    e: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// Verifies Clerk session tokens (RS256).
///
/// Built once at startup, either from the instance JWKS endpoint or from a
/// pinned PEM public key, and shared with the request pipeline as app data.
#[derive(Clone)]
pub struct SessionVerifier {
    key: DecodingKey,
}

impl SessionVerifier {
    pub fn from_rsa_pem(pem: &str) -> Res<Self> {
        let key = DecodingKey::from_rsa_pem(pem.as_bytes())?;
        Ok(SessionVerifier { key })
    }

    /// Fetches the instance JWKS and builds a verifier from its first RSA key.
    pub async fn from_jwks_url(url: &str) -> Res<Self> {
        let jwks = reqwest::get(url).await?.json::<JwkSet>().await?;
        let rsa = jwks
            .keys
            .iter()
            .find(|k| k.kty == "RSA" && k.n.is_some() && k.e.is_some())
            .ok_or_else(|| AppError::Internal("JWKS contains no usable RSA key".to_string()))?;
        let key = DecodingKey::from_rsa_components(
            rsa.n.as_deref().unwrap_or_default(),
            rsa.e.as_deref().unwrap_or_default(),
        )?;
        Ok(SessionVerifier { key })
    }

    /// Extracts claims from a session token, checking signature and expiry.
    pub fn validate(&self, token: &str) -> Res<SessionClaims> {
        let token_data = jsonwebtoken::decode::<SessionClaims>(
            token,
            &self.key,
            &Validation::new(Algorithm::RS256),
        )?;
        Ok(token_data.claims)
    }
}

pub fn get_session_claims_or_error(req: &ServiceRequest) -> Result<SessionClaims, HttpResponse> {
    if let Some(claims_res) = req.extensions().get::<Res<SessionClaims>>() {
        match claims_res {
            Ok(claims) => Ok(claims.clone()),
            Err(app_error) => Err(app_error.to_http_response()),
        }
    } else {
        Err(
            AppError::Unauthorized("No authorization token provided".to_string())
                .to_http_response(),
        )
    }
}
