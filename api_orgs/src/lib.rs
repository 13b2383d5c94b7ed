use actix_web::web::{self};

pub mod routes {
    pub mod member;
    pub mod org;
}

mod services {
    pub(crate) mod org;
}

mod dtos {
    pub(crate) mod org;
}

pub fn mount_orgs() -> actix_web::Scope {
    web::scope("/orgs")
        .service(routes::org::post_org)
        .service(routes::org::get_orgs)
        .service(routes::org::get_org)
        .service(routes::org::put_org)
        .service(routes::org::delete_org)
        .service(routes::member::get_members)
        .service(routes::member::post_member)
        .service(routes::member::delete_member)
}
