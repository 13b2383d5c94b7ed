use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};
use common::{error::Res, http::Success, jwt::SessionClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{dtos::org::AddMemberRequest, services};

/// Lists the members of an organization with their display fields.
#[get("/{org_id}/members")]
pub async fn get_members(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let members = services::org::list_members(&pool, &claims, path.into_inner()).await?;
    Success::ok(members)
}

/// Adds an existing user to an organization by email.
///
/// # Input
/// - `req`: JSON payload with the member's email and a role drawn from
///   owner, admin or member
///
/// # Output
/// - Success: Returns the created membership with 201 Created status
/// - Error: 400 for an unknown role or an existing membership, 404 when
///   the email does not resolve to a registered user
#[post("/{org_id}/members")]
pub async fn post_member(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
    req: web::Json<AddMemberRequest>,
) -> Res<impl Responder> {
    let body = req.into_inner();
    let membership =
        services::org::add_member(&pool, &claims, path.into_inner(), body.email, body.role).await?;
    Success::created(membership)
}

#[delete("/{org_id}/members/{user_id}")]
pub async fn delete_member(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<(Uuid, Uuid)>,
) -> Res<impl Responder> {
    let (org_id, user_id) = path.into_inner();
    services::org::remove_member(&pool, &claims, org_id, user_id).await?;
    Success::ok(serde_json::json!({ "id": user_id }))
}
