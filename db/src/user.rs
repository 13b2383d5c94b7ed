use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{dtos::user::UserUpsert, models::user::User};

pub async fn get_user_by_external_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    external_id: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE external_id = $1")
        .bind(external_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Inserts or refreshes the mirror of an identity-provider user record.
pub async fn upsert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: UserUpsert,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (external_id, email, first_name, last_name, image_url)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (external_id) DO UPDATE SET
            email = EXCLUDED.email,
            first_name = EXCLUDED.first_name,
            last_name = EXCLUDED.last_name,
            image_url = EXCLUDED.image_url,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(data.external_id)
    .bind(data.email)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.image_url)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_user_by_external_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    external_id: &str,
) -> Res<u64> {
    sqlx::query("DELETE FROM users WHERE external_id = $1")
        .bind(external_id)
        .execute(executor)
        .await
        .map(|done| done.rows_affected())
        .map_err(AppError::from)
}
