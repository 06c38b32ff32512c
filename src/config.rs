use std::net::IpAddr;

use crate::changes::observer::DEFAULT_AUTH_ROUTES;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    /// `None` when `DECOY_LOG_CHANGES` is unset or not a boolean.
    pub log_changes: Option<bool>,
    /// Routes during which model changes are not logged.
    pub auth_routes: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("DECOY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid DECOY_HOST: {e}"))?;

        let port: u16 = env_or("DECOY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid DECOY_PORT: {e}"))?;

        let log_level = env_or("DECOY_LOG_LEVEL", "info");

        let log_changes = std::env::var("DECOY_LOG_CHANGES")
            .ok()
            .and_then(|v| parse_flag(&v));

        let auth_routes = match std::env::var("DECOY_AUTH_ROUTES") {
            Ok(v) => parse_routes(&v),
            Err(_) => DEFAULT_AUTH_ROUTES.iter().map(|r| r.to_string()).collect(),
        };

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            log_level,
            log_changes,
            auth_routes,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_routes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
