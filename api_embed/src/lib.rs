use actix_web::web::{self};

pub mod routes {
    pub mod embed;
}

mod services {
    pub(crate) mod embed;
}

mod dtos {
    pub(crate) mod embed;
}

pub fn mount_embed() -> actix_web::Scope {
    web::scope("")
        .service(routes::embed::get_form)
        .service(routes::embed::post_submission)
        .service(routes::embed::get_wall)
}
