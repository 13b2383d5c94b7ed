use std::sync::Arc;

use actix_web::{Responder, post, web};
use common::{
    env_config::Config,
    error::{AppError, Res},
    http::Success,
    webhook::{self, WebhookHeaders},
};
use sqlx::PgPool;

use crate::{dtos::webhook::ClerkEvent, services};

/// Receives user lifecycle events from the identity provider.
///
/// # Input
/// - `payload`: Raw string containing the webhook event data
/// - `req`: HTTP request carrying the `svix-id`, `svix-timestamp` and
///   `svix-signature` delivery headers
/// - `pool`: Database connection pool
/// - `config`: Application configuration with the webhook signing secret
///
/// # Output
/// - Success: Returns 200 OK once the event is applied to the user mirror
/// - Error: Returns 400 for missing delivery headers, 401 for a bad
///   signature, 500 for processing errors
///
/// # Note
/// This endpoint is not called from the dashboard. It's called by Clerk's
/// servers when users are created, updated or deleted. Configure the URL
/// under Webhooks in the Clerk dashboard and subscribe to the
/// `user.created`, `user.updated` and `user.deleted` events.
#[post("/clerk")]
async fn post_clerk(
    payload: String,
    req: actix_web::HttpRequest,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::BadRequest(format!("Missing '{}' header", name)))
    };
    let headers = WebhookHeaders {
        id: header("svix-id")?,
        timestamp: header("svix-timestamp")?,
        signature: header("svix-signature")?,
    };

    webhook::verify_signature(&config.clerk.webhook_secret, &headers, &payload)?;

    let event: ClerkEvent = serde_json::from_str(&payload)?;
    services::user::process_event(&pool, event).await?;

    Success::ok("Webhook processed successfully")
}
