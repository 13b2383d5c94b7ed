use common::{
    error::{AppError, Res},
    jwt::SessionClaims,
    misc::generate_embed_key,
};
use db::{
    dtos::project::{ProjectChanges, ProjectCreate},
    models::project::Project,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::project::{CreateProjectRequest, UpdateProjectRequest};

pub async fn create_project(
    pool: &PgPool,
    claims: &SessionClaims,
    req: CreateProjectRequest,
) -> Res<Project> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("name", "must not be empty"));
    }
    // membership in the target organization is the create permission
    let org = db::org::get_org_for_user(pool, req.organization_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;

    db::project::insert_project(
        pool,
        ProjectCreate {
            organization_id: org.id,
            name: req.name,
            domain: req.domain,
            embed_key: generate_embed_key(),
        },
    )
    .await
}

pub async fn list_projects(
    pool: &PgPool,
    claims: &SessionClaims,
    organization_id: Uuid,
) -> Res<Vec<Project>> {
    let org = db::org::get_org_for_user(pool, organization_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;
    db::project::list_projects_for_org(pool, org.id).await
}

pub async fn get_project(pool: &PgPool, claims: &SessionClaims, project_id: Uuid) -> Res<Project> {
    db::project::get_project_for_user(pool, project_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn update_project(
    pool: &PgPool,
    claims: &SessionClaims,
    project_id: Uuid,
    req: UpdateProjectRequest,
) -> Res<Project> {
    let project = get_project(pool, claims, project_id).await?;

    let changes = ProjectChanges {
        name: req.name.into_required("name")?,
        domain: req.domain.into_nullable(),
    };
    if let Some(name) = &changes.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("name", "must not be empty"));
        }
    }
    if changes.is_empty() {
        return Ok(project);
    }

    db::project::update_project(pool, project.id, changes).await
}

pub async fn delete_project(pool: &PgPool, claims: &SessionClaims, project_id: Uuid) -> Res<Uuid> {
    let project = get_project(pool, claims, project_id).await?;
    db::project::delete_project(pool, project.id).await?;
    Ok(project.id)
}
