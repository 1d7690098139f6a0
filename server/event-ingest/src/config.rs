//! Service configuration from environment variables, with local-dev defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
  pub host: IpAddr,
  pub port: u16,
  pub database_url: String,
  pub db_max_connections: u32,
  /// The single origin allowed to call the API from a browser.
  pub cors_allowed_origin: HeaderValue,
  /// Directory that receives `app.log`.
  pub log_dir: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("HOST must be an IP address, got {0:?}")]
  InvalidHost(String),
  #[error("PORT must be a valid u16, got {0:?}")]
  InvalidPort(String),
  #[error("DB_MAX_CONNECTIONS must be a positive integer, got {0:?}")]
  InvalidMaxConnections(String),
  #[error("CORS_ALLOWED_ORIGIN is not a valid header value: {0:?}")]
  InvalidOrigin(String),
}

impl Default for Config {
  fn default() -> Self {
    Self {
      host: IpAddr::V4(Ipv4Addr::LOCALHOST),
      port: 8000,
      database_url: "sqlite://events.db".into(),
      db_max_connections: 5,
      cors_allowed_origin: HeaderValue::from_static("http://localhost:5173"),
      log_dir: ".".into(),
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build from an arbitrary key lookup; unset keys fall back to [`Config::default`].
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let mut cfg = Self::default();

    if let Some(v) = lookup("HOST") {
      cfg.host = v.parse().map_err(|_| ConfigError::InvalidHost(v.clone()))?;
    }
    if let Some(v) = lookup("PORT") {
      cfg.port = v.parse().map_err(|_| ConfigError::InvalidPort(v.clone()))?;
    }
    if let Some(v) = lookup("DATABASE_URL") {
      cfg.database_url = v;
    }
    if let Some(v) = lookup("DB_MAX_CONNECTIONS") {
      cfg.db_max_connections = match v.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => return Err(ConfigError::InvalidMaxConnections(v)),
      };
    }
    if let Some(v) = lookup("CORS_ALLOWED_ORIGIN") {
      cfg.cors_allowed_origin =
        HeaderValue::from_str(&v).map_err(|_| ConfigError::InvalidOrigin(v.clone()))?;
    }
    if let Some(v) = lookup("LOG_DIR") {
      cfg.log_dir = v;
    }

    Ok(cfg)
  }

  pub fn bind_addr(&self) -> SocketAddr {
    SocketAddr::new(self.host, self.port)
  }
}
