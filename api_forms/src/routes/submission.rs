use std::sync::Arc;

use actix_web::{Responder, delete, get, put, web};
use common::{error::Res, http::Success, jwt::SessionClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::testimonial::{FeedQuery, UpdateSubmissionRequest},
    services,
};

/// The reconciled testimonial feed of one project.
///
/// # Input
/// - `query`: `project_id` of the project to list
///
/// # Output
/// - Success: Returns one flat list of tagged entries, newest form first.
///   Every form appears as a `"kind": "form"` entry; its collected
///   submissions follow it as `"kind": "submission"` entries. A legacy
///   form row that carries real testimonial content and has at least one
///   genuine submission additionally contributes a synthetic submission
///   entry pointing at its own form id
/// - Error: 404 when the caller does not belong to the project's
///   organization
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch(
///   `/api/dashboard/testimonials?project_id=${projectId}`,
///   { headers: { 'Authorization': `Bearer ${await session.getToken()}` } }
/// );
///
/// if (response.ok) {
///   const entries = await response.json();
///   const forms = entries.filter(e => e.kind === 'form');
///   const submissions = entries.filter(e => e.kind === 'submission');
/// }
/// ```
#[get("")]
pub async fn get_feed(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    query: web::Query<FeedQuery>,
) -> Res<impl Responder> {
    let entries = services::feed::project_feed(&pool, &claims, query.project_id).await?;
    Success::ok(entries)
}

#[get("/{submission_id}")]
pub async fn get_submission(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let submission =
        services::submission::get_submission(&pool, &claims, path.into_inner()).await?;
    Success::ok(submission)
}

/// Partially updates a submission; publishing and unpublishing are
/// one-field patches of `published`. The parent form is never touched.
#[put("/{submission_id}")]
pub async fn put_submission(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateSubmissionRequest>,
) -> Res<impl Responder> {
    let submission = services::submission::update_submission(
        &pool,
        &claims,
        path.into_inner(),
        req.into_inner(),
    )
    .await?;
    Success::ok(submission)
}

#[delete("/{submission_id}")]
pub async fn delete_submission(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let submission_id =
        services::submission::delete_submission(&pool, &claims, path.into_inner()).await?;
    Success::ok(serde_json::json!({ "id": submission_id }))
}
