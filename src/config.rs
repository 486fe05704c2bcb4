use anyhow::Context;

use crate::core::db::mysql_url;
use crate::core::helpers::HashCost;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    /// Only used for logging; the URL may carry credentials.
    pub database_host: String,
    pub port: u16,
    /// Empty means any origin is allowed.
    pub cors_allowed_origins: Vec<String>,
    pub hash_cost: HashCost,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_host = var("DB_HOST", "localhost");
        let database_url = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => url,
            None => mysql_url(
                &database_host,
                &var("DB_USER", "root"),
                &var("DB_PASSWORD", ""),
                &var("DB_NAME", "myDiary"),
            ),
        };

        let port = var("PORT", "3000")
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty() && *origin != "*")
            .map(String::from)
            .collect();

        let defaults = HashCost::default();
        let hash_cost = HashCost {
            memory_kib: parse_or(&lookup, "HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&lookup, "HASH_ITERATIONS", defaults.iterations)?,
        };

        Ok(Config {
            database_url,
            database_host,
            port,
            cors_allowed_origins,
            hash_cost,
        })
    }
}

fn parse_or<F>(lookup: &F, key: &str, default: u32) -> anyhow::Result<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => v
            .parse::<u32>()
            .with_context(|| format!("{} must be a positive integer", key)),
        None => Ok(default),
    }
}
