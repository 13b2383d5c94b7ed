use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// This struct holds all the necessary configuration parameters
/// required to initialize and run the server.
/// It includes database connection details, Clerk integration settings,
/// server host and port, number of worker threads, CORS settings
/// and logging preferences.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// Configuration for the Clerk identity provider integration.
    pub clerk: ClerkConfig,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for the dashboard's CORS policy.
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
}

#[derive(Clone, Debug)]
/// Settings for verifying Clerk-issued credentials.
///
/// Dashboard requests carry a Clerk session token (an RS256 JWT); user
/// lifecycle events arrive on a webhook signed with the endpoint secret.
/// The session token is verified against either the instance JWKS endpoint
/// or a pinned PEM public key.
pub struct ClerkConfig {
    /// Signing secret of the Clerk webhook endpoint (`whsec_...`).
    pub webhook_secret: String,
    /// JWKS endpoint of the Clerk instance, fetched once at startup.
    pub jwks_url: Option<String>,
    /// PEM-encoded RSA public key, used when no JWKS URL is configured.
    pub jwt_public_key: Option<String>,
}

impl ClerkConfig {
    /// Creates a new `ClerkConfig` instance from environment variables.
    ///
    /// - `CLERK_WEBHOOK_SECRET`: Required. Signing secret of the webhook endpoint.
    /// - `CLERK_JWKS_URL`: Optional. JWKS endpoint of the Clerk instance.
    /// - `CLERK_JWT_PUBLIC_KEY`: Optional. Pinned PEM public key.
    ///
    /// # Panics
    ///
    /// This function will panic if `CLERK_WEBHOOK_SECRET` is not set, or if
    /// neither `CLERK_JWKS_URL` nor `CLERK_JWT_PUBLIC_KEY` is provided.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwks_url = env::var("CLERK_JWKS_URL").ok();
        let jwt_public_key = env::var("CLERK_JWT_PUBLIC_KEY").ok();
        if jwks_url.is_none() && jwt_public_key.is_none() {
            panic!("Either CLERK_JWKS_URL or CLERK_JWT_PUBLIC_KEY must be set");
        }

        ClerkConfig {
            webhook_secret: env::var("CLERK_WEBHOOK_SECRET")
                .expect("CLERK_WEBHOOK_SECRET must be set"),
            jwks_url,
            jwt_public_key,
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`: "development" or "production"
    /// - `DATABASE_URL`: Connection string for the database
    /// - Clerk settings (via `ClerkConfig::from_env()`)
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed dashboard origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    ///
    /// # Panics
    ///
    /// This function will panic if required environment variables are missing
    /// or if numeric values cannot be parsed correctly.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            clerk: ClerkConfig::from_env(),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
        })
    }
}
