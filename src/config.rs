use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// How users prove who they are before a bearer token is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Email + password checked against the local hashes.
    Local,
    /// An external SAML gateway signs tokens with the shared secret.
    Saml,
}

impl FromStr for AuthStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(AuthStrategy::Local),
            "saml" => Ok(AuthStrategy::Saml),
            other => Err(format!("unknown auth strategy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub auth_strategy: AuthStrategy,
    pub frontend_origin: Option<String>,
    pub public_rps: u32,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:3001"),
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            token_ttl_minutes: get_env_parse_or("TOKEN_TTL_MINUTES", 8 * 60)?,
            auth_strategy: get_env_parse_or("AUTH_STRATEGY", AuthStrategy::Saml)?,
            frontend_origin: env::var("FRONTEND_ORIGIN").ok(),
            public_rps: get_env_parse_or("PUBLIC_RPS", 50)?,
            db_max_connections: get_env_parse_or("DB_MAX_CONNECTIONS", 10)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_strategy_parses_case_insensitively() {
        assert_eq!("LOCAL".parse::<AuthStrategy>(), Ok(AuthStrategy::Local));
        assert_eq!(" saml ".parse::<AuthStrategy>(), Ok(AuthStrategy::Saml));
        assert!("oauth".parse::<AuthStrategy>().is_err());
    }
}
