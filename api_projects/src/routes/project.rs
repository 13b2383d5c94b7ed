use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::{error::Res, http::Success, jwt::SessionClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::project::{CreateProjectRequest, ProjectListQuery, UpdateProjectRequest},
    services,
};

/// Creates a project inside one of the caller's organizations.
///
/// # Input
/// - `req`: JSON payload with the organization id, a project name and an
///   optional domain
///
/// # Output
/// - Success: Returns the created project with 201 Created status. The
///   project's public embed key is generated server-side
/// - Error: 404 when the caller does not belong to the organization
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/dashboard/projects', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${await session.getToken()}`
///   },
///   body: JSON.stringify({
///     organization_id: orgId,
///     name: 'Marketing site',
///     domain: 'www.example.com' // Optional
///   })
/// });
/// ```
#[post("")]
pub async fn post_project(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<CreateProjectRequest>,
) -> Res<impl Responder> {
    let project = services::project::create_project(&pool, &claims, req.into_inner()).await?;
    Success::created(project)
}

/// Lists the projects of one organization, newest first.
#[get("")]
pub async fn get_projects(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    query: web::Query<ProjectListQuery>,
) -> Res<impl Responder> {
    let projects =
        services::project::list_projects(&pool, &claims, query.organization_id).await?;
    Success::ok(projects)
}

#[get("/{project_id}")]
pub async fn get_project(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let project = services::project::get_project(&pool, &claims, path.into_inner()).await?;
    Success::ok(project)
}

/// Partially updates a project. Absent fields are untouched; an explicit
/// null clears the optional domain.
#[put("/{project_id}")]
pub async fn put_project(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateProjectRequest>,
) -> Res<impl Responder> {
    let project =
        services::project::update_project(&pool, &claims, path.into_inner(), req.into_inner())
            .await?;
    Success::ok(project)
}

#[delete("/{project_id}")]
pub async fn delete_project(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let project_id = services::project::delete_project(&pool, &claims, path.into_inner()).await?;
    Success::ok(serde_json::json!({ "id": project_id }))
}
