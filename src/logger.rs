//! The logger template handed to the context enricher.
//!
//! A [`Logger`] wraps a [`tracing::Dispatch`]. The enricher creates each
//! request's span under it and runs the rest of the chain with it as the
//! default subscriber, so every event a handler emits lands in the same
//! place as the access log line. Pass a different subscriber to capture
//! output in tests.

use std::fmt;

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};
use crate::error::{Error, Kind};

/// Read-only logger template shared by every request.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    /// Wraps any subscriber.
    pub fn new(subscriber: impl Into<Dispatch>) -> Self {
        Self { dispatch: subscriber.into() }
    }

    /// The subscriber that is the default for the calling thread.
    pub fn current() -> Self {
        Self { dispatch: Dispatch::default() }
    }

    /// Builds a `fmt` subscriber writing to stdout in the configured format.
    ///
    /// # Errors
    ///
    /// Returns an internal error if `log_level` is not a valid filter directive.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let filter = EnvFilter::try_new(&config.log_level)
            .map_err(|e| Error::wrap(Kind::Internal, e))?;
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let dispatch = match config.log_format {
            LogFormat::Json => Dispatch::new(builder.json().finish()),
            LogFormat::Pretty => Dispatch::new(builder.pretty().finish()),
        };
        Ok(Self { dispatch })
    }

    pub fn dispatch(&self) -> &Dispatch { &self.dispatch }

    /// Runs `f` with this logger as the default subscriber.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Makes this logger the process-wide default, for events emitted
    /// outside any chain (server lifecycle, unmatched routes).
    pub fn install_global(&self) -> Result<(), Error> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|e| Error::wrap(Kind::Internal, e))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_directive() {
        let cfg = Config { log_level: "gantry=notalevel".into(), ..Config::default() };
        let err = Logger::from_config(&cfg).unwrap_err();
        assert_eq!(err.kind(), Kind::Internal);
    }

    #[test]
    fn builds_both_formats() {
        for log_format in [LogFormat::Json, LogFormat::Pretty] {
            let cfg = Config { log_format, ..Config::default() };
            assert!(Logger::from_config(&cfg).is_ok());
        }
    }
}
