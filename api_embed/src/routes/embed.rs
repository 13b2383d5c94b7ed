use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;

use crate::{dtos::embed::PublicSubmissionRequest, services};

/// The public descriptor of a testimonial form, addressed by embed key.
/// Unauthenticated; this is what the embedded widget loads first.
#[get("/forms/{embed_key}")]
pub async fn get_form(
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<String>,
) -> Res<impl Responder> {
    let form = services::embed::fetch_form(&pool, &path.into_inner()).await?;
    Success::ok(form)
}

/// Accepts a testimonial submitted through an embedded form.
///
/// # Input
/// - `path`: The form's public embed key
/// - `req`: JSON payload with the testimonial content; `name` and
///   `content` are required, everything else is optional
///
/// # Output
/// - Success: Returns the stored submission with 201 Created status. New
///   submissions are always unpublished until a dashboard user approves
///   them
/// - Error: 400 with a field-level message for missing required fields,
///   404 when the embed key does not resolve
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch(`/embed/forms/${embedKey}/submissions`, {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({
///     name: 'Grace Hopper',
///     company: 'US Navy',
///     rating: 5,
///     content: 'Saved us weeks of work.'
///   })
/// });
/// ```
#[post("/forms/{embed_key}/submissions")]
pub async fn post_submission(
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<String>,
    req: web::Json<PublicSubmissionRequest>,
) -> Res<impl Responder> {
    let submission =
        services::embed::submit(&pool, &path.into_inner(), req.into_inner()).await?;
    Success::created(submission)
}

/// The published testimonials of a project, addressed by the project's
/// embed key. Backs the wall-of-love widget.
#[get("/projects/{embed_key}/testimonials")]
pub async fn get_wall(
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<String>,
) -> Res<impl Responder> {
    let wall = services::embed::published_wall(&pool, &path.into_inner()).await?;
    Success::ok(wall)
}
