//! Process configuration.
//!
//! Values are read from `GANTRY_`-prefixed environment variables at startup:
//!
//! | Variable | Default |
//! |---|---|
//! | `GANTRY_ADDR` | `0.0.0.0:8080` |
//! | `GANTRY_LOG_LEVEL` | `info` (any `EnvFilter` directive) |
//! | `GANTRY_LOG_FORMAT` | `json` (`json` or `pretty`) |

use std::net::SocketAddr;

use ::config::Environment;
use serde::Deserialize;

use crate::error::{Error, Kind};

/// Output format of the process logger.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    /// Multi-line, human-friendly output for local development.
    Pretty,
}

/// Validated service configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Address the server binds to.
    #[serde(default = "default_addr")]
    pub addr: SocketAddr,

    /// Tracing filter directive (e.g. `"info"`, `"gantry=debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Loads and validates configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a variable cannot be parsed or fails
    /// validation.
    pub fn from_env() -> Result<Self, Error> {
        Self::load(Environment::with_prefix("GANTRY"))
    }

    fn load(env: Environment) -> Result<Self, Error> {
        let cfg: Config = ::config::Config::builder()
            .add_source(env)
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.log_level.trim().is_empty() {
            return Err(Error::new(Kind::Internal, "GANTRY_LOG_LEVEL must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Environment::with_prefix("GANTRY").source(Some(map))
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = Config::load(env(&[])).unwrap();
        assert_eq!(cfg.addr, default_addr());
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_prefixed_variables() {
        let cfg = Config::load(env(&[
            ("GANTRY_ADDR", "127.0.0.1:3000"),
            ("GANTRY_LOG_LEVEL", "gantry=debug"),
            ("GANTRY_LOG_FORMAT", "pretty"),
        ]))
        .unwrap();
        assert_eq!(cfg.addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(cfg.log_level, "gantry=debug");
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_bad_address() {
        let err = Config::load(env(&[("GANTRY_ADDR", "not-an-addr")])).unwrap_err();
        assert_eq!(err.kind(), Kind::Internal);
    }

    #[test]
    fn validate_rejects_blank_level() {
        let cfg = Config { log_level: "  ".into(), ..Config::default() };
        assert!(cfg.validate().is_err());
    }
}
