use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    dtos::project::{ProjectChanges, ProjectCreate},
    models::project::Project,
};

pub async fn insert_project<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: ProjectCreate,
) -> Res<Project> {
    sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (organization_id, name, domain, embed_key)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(data.organization_id)
    .bind(data.name)
    .bind(data.domain)
    .bind(data.embed_key)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Resolves a project only when the caller belongs to the owning
/// organization.
pub async fn get_project_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    project_id: Uuid,
    caller: &str,
) -> Res<Option<Project>> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT p.*
        FROM projects p
        JOIN organization_memberships m ON m.organization_id = p.organization_id
        JOIN users u ON u.id = m.user_id
        WHERE p.id = $1 AND u.external_id = $2
        "#,
    )
    .bind(project_id)
    .bind(caller)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Public lookup by embed key, no membership involved.
pub async fn get_project_by_embed_key<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    embed_key: &str,
) -> Res<Option<Project>> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE embed_key = $1")
        .bind(embed_key)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn list_projects_for_org<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    organization_id: Uuid,
) -> Res<Vec<Project>> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE organization_id = $1 ORDER BY created_at DESC",
    )
    .bind(organization_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_project<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    project_id: Uuid,
    changes: ProjectChanges,
) -> Res<Project> {
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE projects SET ");
    {
        let mut set = qb.separated(", ");
        set.push("updated_at = now()");
        if let Some(name) = changes.name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(domain) = changes.domain {
            set.push("domain = ").push_bind_unseparated(domain);
        }
    }
    qb.push(" WHERE id = ");
    qb.push_bind(project_id);
    qb.push(" RETURNING *");

    qb.build_query_as::<Project>()
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn delete_project<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    project_id: Uuid,
) -> Res<u64> {
    sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(project_id)
        .execute(executor)
        .await
        .map(|done| done.rows_affected())
        .map_err(AppError::from)
}
