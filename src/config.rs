use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `DATABASE_URL` wins over the
    /// individual `DB_*` parts.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                var("DB_USER", "postgres"),
                var("DB_PASSWORD", "password"),
                var("DB_HOST", "localhost"),
                var("DB_PORT", "5432"),
                var("DB_NAME", "userdb"),
            ),
        };

        let max_connections = var("DB_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;

        let port = lookup("APP_PORT")
            .or_else(|| lookup("PORT"))
            .unwrap_or_else(|| "5000".into())
            .parse::<u16>()
            .context("APP_PORT must be a valid port number")?;

        Ok(Self {
            database_url,
            max_connections,
            host: var("APP_HOST", "0.0.0.0"),
            port,
        })
    }
}
