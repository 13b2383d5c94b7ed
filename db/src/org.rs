use common::{
    error::{AppError, Res},
    misc::OrgRole,
};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::org::OrgCreate,
    models::org::{MemberRow, Membership, Organization},
};

pub async fn exists_org_by_slug<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    slug: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM organizations WHERE slug = $1)")
        .bind(slug)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_org<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: OrgCreate,
) -> Res<Organization> {
    sqlx::query_as::<_, Organization>(
        r#"
        INSERT INTO organizations (name, slug)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(data.name)
    .bind(data.slug)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_membership<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    organization_id: Uuid,
    user_id: Uuid,
    role: OrgRole,
) -> Res<Membership> {
    sqlx::query_as::<_, Membership>(
        r#"
        INSERT INTO organization_memberships (organization_id, user_id, role)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(organization_id)
    .bind(user_id)
    .bind(role.as_str())
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Resolves an organization only when the caller is one of its members.
/// A non-member gets `None`, same as a missing row.
pub async fn get_org_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    org_id: Uuid,
    caller: &str,
) -> Res<Option<Organization>> {
    sqlx::query_as::<_, Organization>(
        r#"
        SELECT o.*
        FROM organizations o
        JOIN organization_memberships m ON m.organization_id = o.id
        JOIN users u ON u.id = m.user_id
        WHERE o.id = $1 AND u.external_id = $2
        "#,
    )
    .bind(org_id)
    .bind(caller)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_orgs_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    caller: &str,
) -> Res<Vec<Organization>> {
    sqlx::query_as::<_, Organization>(
        r#"
        SELECT o.*
        FROM organizations o
        JOIN organization_memberships m ON m.organization_id = o.id
        JOIN users u ON u.id = m.user_id
        WHERE u.external_id = $1
        ORDER BY o.created_at DESC
        "#,
    )
    .bind(caller)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_org_name<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    org_id: Uuid,
    name: &str,
) -> Res<Organization> {
    sqlx::query_as::<_, Organization>(
        "UPDATE organizations SET name = $1 WHERE id = $2 RETURNING *",
    )
    .bind(name)
    .bind(org_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_org<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    org_id: Uuid,
) -> Res<u64> {
    sqlx::query("DELETE FROM organizations WHERE id = $1")
        .bind(org_id)
        .execute(executor)
        .await
        .map(|done| done.rows_affected())
        .map_err(AppError::from)
}

pub async fn list_members<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    org_id: Uuid,
) -> Res<Vec<MemberRow>> {
    sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT u.id AS user_id, u.external_id, u.email, u.first_name,
               u.last_name, u.image_url, m.role, m.created_at AS member_since
        FROM organization_memberships m
        JOIN users u ON u.id = m.user_id
        WHERE m.organization_id = $1
        ORDER BY m.created_at ASC
        "#,
    )
    .bind(org_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_membership<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    org_id: Uuid,
    user_id: Uuid,
) -> Res<Option<Membership>> {
    sqlx::query_as::<_, Membership>(
        "SELECT * FROM organization_memberships WHERE organization_id = $1 AND user_id = $2",
    )
    .bind(org_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_membership<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    org_id: Uuid,
    user_id: Uuid,
) -> Res<u64> {
    sqlx::query(
        "DELETE FROM organization_memberships WHERE organization_id = $1 AND user_id = $2",
    )
    .bind(org_id)
    .bind(user_id)
    .execute(executor)
    .await
    .map(|done| done.rows_affected())
    .map_err(AppError::from)
}
