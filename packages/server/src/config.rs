use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub auth_issuer: String,
    pub auth_audience: String,
    pub auth_jwks_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let auth_issuer = env::var("AUTH_ISSUER").context("AUTH_ISSUER must be set")?;
        let auth_jwks_url = env::var("AUTH_JWKS_URL")
            .unwrap_or_else(|_| default_jwks_url(&auth_issuer));

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            auth_audience: env::var("AUTH_AUDIENCE").context("AUTH_AUDIENCE must be set")?,
            auth_issuer,
            auth_jwks_url,
        })
    }
}

/// Well-known JWKS location under the issuer, per RFC 8414
fn default_jwks_url(issuer: &str) -> String {
    format!("{}/.well-known/jwks.json", issuer.trim_end_matches('/'))
}
