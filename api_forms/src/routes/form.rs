use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use common::{error::Res, http::Success, jwt::SessionClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::form::{CreateFormRequest, UpdateFormRequest},
    services,
};

/// Creates a testimonial-collection form in a project.
///
/// # Input
/// - `req`: JSON payload with the project id and an optional form
///   configuration document (field list, labels, display copy)
///
/// # Output
/// - Success: Returns the created form with 201 Created status. The form
///   starts as a pure template with placeholder content, unpublished, and
///   gets its own public embed key
/// - Error: 404 when the caller does not belong to the project's
///   organization
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/dashboard/forms', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${await session.getToken()}`
///   },
///   body: JSON.stringify({
///     project_id: projectId,
///     form_config: {
///       title: 'Share your story',
///       fields: ['name', 'company', 'rating', 'content']
///     }
///   })
/// });
/// ```
#[post("")]
pub async fn post_form(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<CreateFormRequest>,
) -> Res<impl Responder> {
    let form = services::form::create_form(&pool, &claims, req.into_inner()).await?;
    Success::created(form)
}

#[get("/{form_id}")]
pub async fn get_form(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let form = services::form::get_form(&pool, &claims, path.into_inner()).await?;
    Success::ok(form)
}

/// Partially updates a form. Only supplied fields change; explicit nulls
/// clear optional fields. Patching a form never touches its submissions.
#[put("/{form_id}")]
pub async fn put_form(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateFormRequest>,
) -> Res<impl Responder> {
    let form =
        services::form::update_form(&pool, &claims, path.into_inner(), req.into_inner()).await?;
    Success::ok(form)
}

#[delete("/{form_id}")]
pub async fn delete_form(
    claims: web::ReqData<SessionClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let form_id = services::form::delete_form(&pool, &claims, path.into_inner()).await?;
    Success::ok(serde_json::json!({ "id": form_id }))
}
