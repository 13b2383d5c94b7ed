use actix_web::web::{self};

pub mod routes {
    pub mod form;
    pub mod submission;
}

pub mod services {
    pub mod feed;
    pub(crate) mod form;
    pub(crate) mod submission;
}

pub mod dtos {
    pub(crate) mod form;
    pub mod testimonial;
}

pub fn mount_forms() -> actix_web::Scope {
    web::scope("/forms")
        .service(routes::form::post_form)
        .service(routes::form::get_form)
        .service(routes::form::put_form)
        .service(routes::form::delete_form)
}

pub fn mount_testimonials() -> actix_web::Scope {
    web::scope("/testimonials")
        .service(routes::submission::get_feed)
        .service(routes::submission::get_submission)
        .service(routes::submission::put_submission)
        .service(routes::submission::delete_submission)
}
