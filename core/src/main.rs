mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::{env_config::Config, jwt::SessionVerifier};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // build the session-token verifier from the Clerk instance keys
    let verifier = match &config.clerk.jwks_url {
        Some(url) => SessionVerifier::from_jwks_url(url)
            .await
            .expect("Failed to fetch JWKS from Clerk"),
        None => SessionVerifier::from_rsa_pem(
            config.clerk.jwt_public_key.as_deref().unwrap_or_default(),
        )
        .expect("Failed to parse CLERK_JWT_PUBLIC_KEY"),
    };
    let verifier_data = web::Data::new(verifier);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(verifier_data.clone())
            .wrap(logger::middleware()) // 2nd
            .wrap(extractor::middleware()) // 1st
            .service(
                web::scope("/api")
                    .service(api_auth::mount_webhooks())
                    .service(
                        web::scope("/dashboard")
                            .wrap(api_auth::auth_middleware()) // 2nd
                            .wrap(cors::middleware(&origin)) // 1st
                            .service(api_orgs::mount_orgs())
                            .service(api_projects::mount_projects())
                            .service(api_forms::mount_forms())
                            .service(api_forms::mount_testimonials()),
                    ),
            )
            .service(
                web::scope("/embed")
                    .wrap(cors::public())
                    .service(api_embed::mount_embed()),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
