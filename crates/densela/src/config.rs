//! Runtime configuration for backend selection.
//!
//! Settings are read once per thread from the environment:
//!
//! - `DENSELA_BACKEND`: `faer` (default) or `generic`
//! - `DENSELA_SMALL_GEMM`: products with fewer than this many multiply-adds
//!   (`m * n * k`) use the generic backend; `0` (default) disables the cutoff
//!
//! Unrecognized values are ignored with a warning. [`set`] overrides the
//! configuration of the current thread.

use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

use crate::error::LinalgError;

pub const BACKEND_ENV: &str = "DENSELA_BACKEND";
pub const SMALL_GEMM_ENV: &str = "DENSELA_SMALL_GEMM";

/// Which [`LinalgBackend`](crate::backend::LinalgBackend) runs products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Faer,
    Generic,
}

impl FromStr for BackendKind {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faer" => Ok(BackendKind::Faer),
            "generic" | "naive" => Ok(BackendKind::Generic),
            other => Err(LinalgError::invalid_argument(format!(
                "unknown backend {other:?}, expected \"faer\" or \"generic\""
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Faer => f.write_str("faer"),
            BackendKind::Generic => f.write_str("generic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub backend: BackendKind,
    pub small_gemm_cutoff: usize,
}

impl Config {
    /// Configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(value) = lookup(BACKEND_ENV) {
            match value.parse() {
                Ok(backend) => config.backend = backend,
                Err(err) => tracing::warn!(%err, "ignoring {BACKEND_ENV}"),
            }
        }
        if let Some(value) = lookup(SMALL_GEMM_ENV) {
            match value.trim().parse::<usize>() {
                Ok(cutoff) => config.small_gemm_cutoff = cutoff,
                Err(err) => tracing::warn!(%err, value = %value, "ignoring {SMALL_GEMM_ENV}"),
            }
        }
        tracing::debug!(backend = %config.backend, cutoff = config.small_gemm_cutoff, "densela config");
        config
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Config>> = const { RefCell::new(None) };
}

/// Configuration in effect on this thread.
pub fn get() -> Config {
    CURRENT.with(|c| c.borrow_mut().get_or_insert_with(Config::from_env).clone())
}

/// Override the configuration of this thread.
pub fn set(config: Config) {
    CURRENT.with(|c| *c.borrow_mut() = Some(config));
}

/// Drop any override; the environment is consulted again on next use.
pub fn reset() {
    CURRENT.with(|c| *c.borrow_mut() = None);
}

/// Run `f` with `config` in effect, restoring the previous state afterwards.
///
/// The previous state is restored even when `f` unwinds.
pub fn with_config<R>(config: Config, f: impl FnOnce() -> R) -> R {
    let _restore = Restore(CURRENT.with(|c| c.borrow_mut().replace(config)));
    f()
}

struct Restore(Option<Config>);

impl Drop for Restore {
    fn drop(&mut self) {
        let previous = self.0.take();
        CURRENT.with(|c| *c.borrow_mut() = previous);
    }
}
