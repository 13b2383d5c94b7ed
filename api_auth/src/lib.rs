use actix_web::web::{self};
use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}
pub mod routes {
    pub mod webhook;
}
mod services {
    pub(crate) mod user;
}
mod dtos {
    pub(crate) mod webhook;
}

// Auth guard for the dashboard scope
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}

pub fn mount_webhooks() -> actix_web::Scope {
    web::scope("/webhooks").service(routes::webhook::post_clerk)
}
