use actix_web::web::{self};

pub mod routes {
    pub mod project;
}

mod services {
    pub(crate) mod project;
}

mod dtos {
    pub(crate) mod project;
}

pub fn mount_projects() -> actix_web::Scope {
    web::scope("/projects")
        .service(routes::project::post_project)
        .service(routes::project::get_projects)
        .service(routes::project::get_project)
        .service(routes::project::put_project)
        .service(routes::project::delete_project)
}
