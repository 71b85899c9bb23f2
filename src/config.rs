use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

/// Credentials and endpoint for the external ATS. Injected into the
/// reconciliation engine at construction time rather than read from
/// process globals.
#[derive(Debug, Clone)]
pub struct AtsConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl AtsConfig {
    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub api_rps: u32,
    pub ats: AtsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            api_rps: get_env_parse("API_RPS")?,
            ats: AtsConfig {
                base_url: env::var("ATS_API_BASE")
                    .unwrap_or_else(|_| "https://api.indeed.com".to_string()),
                client_id: env::var("ATS_CLIENT_ID").ok(),
                client_secret: env::var("ATS_CLIENT_SECRET").ok(),
            },
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}
