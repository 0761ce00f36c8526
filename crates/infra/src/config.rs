//! Configuration loading and representation.

use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read .env file: {0}")]
    DotEnv(String),

    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Postgres connection string (`DATABASE_URL`).
    pub database_url: String,
    /// HTTP listen port (`PORT`).
    pub port: u16,
}

impl Config {
    /// Load from the process environment, after merging a `.env` file from the
    /// working directory if one exists. Variables already set win over `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(ConfigError::DotEnv(e.to_string())),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match lookup("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: "PORT",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
        };

        Ok(Self { database_url, port })
    }

    /// Address to bind: all interfaces on the configured port.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn port_defaults_to_5000() {
        let cfg = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/kontakt")])).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.listen_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn reads_port_and_url() {
        let cfg = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/contacts"),
            ("PORT", "8081"),
        ]))
        .unwrap();
        assert_eq!(cfg.database_url, "postgres://db/contacts");
        assert_eq!(cfg.port, 8081);
    }

    #[test]
    fn database_url_is_required() {
        assert_eq!(
            Config::from_lookup(lookup(&[("PORT", "8081")])),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("DATABASE_URL", "")])),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/contacts"),
            ("PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }
}
