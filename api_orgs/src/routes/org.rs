use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::{error::Res, http::Success, jwt::SessionClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::org::{CreateOrgRequest, UpdateOrgRequest},
    services,
};

/// Creates a new organization owned by the authenticated user.
///
/// # Input
/// - `claims`: The session claims of the authenticated user
/// - `pool`: Database connection pool
/// - `req`: JSON payload with the organization name and unique slug
///
/// # Output
/// - Success: Returns the created organization with 201 Created status;
///   the caller is recorded as its owner
/// - Error: Returns 400 Bad Request when the slug is already taken or a
///   field is empty
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/dashboard/orgs', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${await session.getToken()}`
///   },
///   body: JSON.stringify({ name: 'ACME Inc', slug: 'acme' })
/// });
///
/// if (response.ok) {
///   const org = await response.json();
///   console.log('Created organization:', org);
/// }
/// ```
#[post("")]
pub async fn post_org(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<CreateOrgRequest>,
) -> Res<impl Responder> {
    let body = req.into_inner();
    let org = services::org::create_org(&pool, &claims, body.name, body.slug).await?;
    Success::created(org)
}

/// Lists the organizations the authenticated user belongs to.
#[get("")]
pub async fn get_orgs(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let orgs = services::org::list_orgs(&pool, &claims).await?;
    Success::ok(orgs)
}

#[get("/{org_id}")]
pub async fn get_org(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let org = services::org::get_org(&pool, &claims, path.into_inner()).await?;
    Success::ok(org)
}

/// Partially updates an organization. Only supplied fields change; the
/// slug is fixed at creation time.
#[put("/{org_id}")]
pub async fn put_org(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateOrgRequest>,
) -> Res<impl Responder> {
    let name = req.into_inner().name.into_required("name")?;
    let org = services::org::rename_org(&pool, &claims, path.into_inner(), name).await?;
    Success::ok(org)
}

#[delete("/{org_id}")]
pub async fn delete_org(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let org_id = services::org::delete_org(&pool, &claims, path.into_inner()).await?;
    Success::ok(serde_json::json!({ "id": org_id }))
}
