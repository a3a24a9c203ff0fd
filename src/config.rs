//! Runtime configuration for the server.

use crate::auth::AuthSettings;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DATABASE: &str = "hackernews.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// SQLite file path, or `:memory:`
    pub database: String,
    /// Allowed CORS origin; any origin when unset
    pub cors_origin: Option<String>,
    pub auth: AuthSettings,
}

impl ServerConfig {
    pub fn new(app_secret: impl Into<String>) -> Self {
        Self {
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            cors_origin: None,
            auth: AuthSettings::new(app_secret),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{DEFAULT_BCRYPT_COST, DEFAULT_TOKEN_TTL_HOURS};

    #[test]
    fn test_defaults() {
        let config = ServerConfig::new("secret");
        assert_eq!(config.port, 4000);
        assert_eq!(config.database, "hackernews.db");
        assert!(config.cors_origin.is_none());
        assert_eq!(config.auth.bcrypt_cost, DEFAULT_BCRYPT_COST);
        assert_eq!(
            config.auth.token_ttl,
            chrono::Duration::hours(DEFAULT_TOKEN_TTL_HOURS)
        );
    }
}
