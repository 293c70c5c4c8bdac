//! Layered application configuration.
//!
//! Precedence, lowest to highest: built-in defaults, YAML file, `GIGMARKET__*`
//! environment variables, CLI overrides.

use std::net::SocketAddr;
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    pub bind_addr: SocketAddr,
    /// Default page size for paginated list endpoints.
    pub page_size: u64,
    /// Hard cap on client-requested page sizes.
    pub max_page_size: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".parse().unwrap_or_else(|_| unreachable!()),
            page_size: 10,
            max_page_size: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SeaORM connection URL, e.g. `postgres://...` or `sqlite::memory:`.
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://gigmarket.db?mode=rwc".to_owned(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for signing bearer tokens. Override in production.
    #[serde(serialize_with = "serialize_secret")]
    pub jwt_secret: SecretString,
    /// Token lifetime in seconds.
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::from("dev-only-insecure-secret".to_owned()),
            token_ttl_secs: 24 * 60 * 60,
        }
    }
}

fn serialize_secret<S>(_secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    // Never echo the secret back out (e.g. via --print-config).
    serializer.serialize_str("********")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Env-filter directive, e.g. "info" or "gigmarket=debug,sea_orm=warn".
    pub level: String,
    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

/// CLI overrides that flow into the config merge.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
}

impl AppConfig {
    /// Load configuration: defaults, then YAML (if given), then env.
    ///
    /// # Errors
    /// Returns a figment error when the file or environment contain values
    /// that do not deserialize into the expected shape.
    pub fn load(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("GIGMARKET__").split("__"))
            .extract()
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(port) = cli.port {
            self.server.bind_addr.set_port(port);
        }
        match cli.verbose {
            0 => {}
            1 => self.logging.level = "info".to_owned(),
            2 => self.logging.level = "debug".to_owned(),
            _ => self.logging.level = "trace".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.page_size, 10);
        assert_eq!(cfg.server.max_page_size, 100);
        assert_eq!(cfg.server.bind_addr.port(), 8000);
        assert!(!cfg.logging.json);
    }

    #[test]
    fn cli_overrides_port_and_verbosity() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(&CliOverrides {
            port: Some(9000),
            verbose: 2,
        });
        assert_eq!(cfg.server.bind_addr.port(), 9000);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn secret_never_serializes_in_plain_text() {
        let cfg = AppConfig::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        assert!(!yaml.contains("insecure-secret"));
        assert!(yaml.contains("********"));
    }
}
