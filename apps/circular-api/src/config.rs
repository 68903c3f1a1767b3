use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, server::CorsConfig, server::ServerConfig};
use database::common::RetryConfig;
use database::mongodb::MongoConfig;
use domain_users::PromotionPolicy;

pub use core_config::Environment;

/// Application configuration, read once at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    /// Backoff for the initial MongoDB connection
    pub mongodb_retry: RetryConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub promotion: PromotionPolicy,
    pub environment: Environment,
}

impl Config {
    /// Fails when `JWT_SECRET` or the MongoDB URL is missing, so the process
    /// never serves requests it could not authenticate or persist.
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?.with_app_name(env!("CARGO_PKG_NAME"));
        let mongodb_retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;
        let cors = CorsConfig::from_env()?;
        let promotion = PromotionPolicy::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            mongodb_retry,
            server,
            jwt,
            cors,
            promotion,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "config-test-secret-0123456789abcdef";

    #[test]
    fn test_from_env_with_minimal_vars() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("JWT_SECRET", Some(SECRET)),
                ("MONGODB_DATABASE", None),
                ("PORT", None),
                ("CORS_ALLOWED_ORIGIN", None),
                ("ADMIN_EMAILS", Some("dean@example.edu")),
                ("MONGODB_CONNECT_RETRIES", Some("8")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 5000);
                assert_eq!(config.mongodb.database(), "circular");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("circular_api"));
                assert!(config.cors.is_permissive());
                assert_eq!(config.app.name, "circular_api");
                assert_eq!(config.mongodb_retry.max_retries, 8);
            },
        );
    }

    #[test]
    fn test_missing_secret_refuses_to_start() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("JWT_SECRET", None),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_SECRET"));
            },
        );
    }

    #[test]
    fn test_short_secret_refuses_to_start() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("JWT_SECRET", Some("short")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
