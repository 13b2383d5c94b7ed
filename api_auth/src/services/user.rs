use common::error::{AppError, Res};
use db::dtos::user::UserUpsert;
use log::{debug, info, warn};
use sqlx::PgPool;

use crate::dtos::webhook::{ClerkDeletedUser, ClerkEvent, ClerkUserData};

/// Applies one identity-provider event to the local user mirror.
/// Unknown event types are acknowledged and ignored.
pub async fn process_event(pool: &PgPool, event: ClerkEvent) -> Res<()> {
    match event.kind.as_str() {
        "user.created" | "user.updated" => {
            let data: ClerkUserData = serde_json::from_value(event.data)?;
            let email = data.primary_email().ok_or_else(|| {
                AppError::validation("email_addresses", "user has no usable email address")
            })?;
            let user = db::user::upsert_user(
                pool,
                UserUpsert {
                    external_id: data.id,
                    email,
                    first_name: data.first_name,
                    last_name: data.last_name,
                    image_url: data.image_url,
                },
            )
            .await?;
            info!("synced user {} from identity provider", user.external_id);
        }
        "user.deleted" => {
            let data: ClerkDeletedUser = serde_json::from_value(event.data)?;
            let removed = db::user::delete_user_by_external_id(pool, &data.id).await?;
            if removed == 0 {
                warn!("delete event for unknown user {}", data.id);
            }
        }
        other => {
            debug!("ignoring webhook event type '{}'", other);
        }
    }
    Ok(())
}
