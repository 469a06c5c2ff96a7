//! Resolver configuration.

use mdpath_version::Version;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable supplying a process-wide fallback version.
pub const VERSION_ENV: &str = "MONGO_DATABASE_VERSION";

/// Explicit configuration for a [`Resolver`](crate::Resolver).
///
/// Owns the fallback default version and the knobs forwarded to every
/// spawned lookup subprocess. Built once by the owning context and
/// handed to the resolver, instead of living as ambient global state.
#[derive(Debug, Clone, Default)]
pub struct Config {
    default_version: Option<Version>,
    envs: Vec<(String, String)>,
    timeout: Option<Duration>,
    current_dir: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the fallback version from [`VERSION_ENV`].
    ///
    /// An unset variable yields no default. A set but malformed value is
    /// also treated as no default, with a warning, so a stray environment
    /// entry cannot poison every lookup with an invalid `m bin` query.
    pub fn from_env() -> Self {
        let default_version = match std::env::var(VERSION_ENV) {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => match Version::parse(&raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!(%e, "ignoring malformed {VERSION_ENV}");
                    None
                }
            },
            Err(_) => None,
        };
        Self {
            default_version,
            ..Self::default()
        }
    }

    pub fn default_version(mut self, version: Version) -> Self {
        self.default_version = Some(version);
        self
    }

    /// Extra environment variable for spawned lookup subprocesses.
    pub fn env(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.envs.push((key.into(), val.into()));
        self
    }

    /// Per-subprocess timeout. Only honored by the asynchronous mode;
    /// blocking invocations run to completion.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub(crate) fn default_version_ref(&self) -> Option<&Version> {
        self.default_version.as_ref()
    }

    pub(crate) fn envs_ref(&self) -> &[(String, String)] {
        &self.envs
    }

    pub(crate) fn timeout_ref(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn current_dir_ref(&self) -> Option<&PathBuf> {
        self.current_dir.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let cfg = Config::new()
            .default_version(Version::parse("3.6.4").unwrap())
            .env("M_PREFIX", "/opt/m")
            .timeout(Duration::from_secs(30))
            .current_dir("/tmp");
        assert_eq!(cfg.default_version_ref().unwrap().as_str(), "3.6.4");
        assert_eq!(cfg.envs_ref().len(), 1);
        assert_eq!(cfg.timeout_ref(), Some(Duration::from_secs(30)));
        assert!(cfg.current_dir_ref().is_some());
    }

    #[test]
    fn test_from_env_reads_version() {
        // Process-global mutation; no other test in this binary touches
        // VERSION_ENV.
        unsafe { std::env::set_var(VERSION_ENV, "4.0.2") };
        let cfg = Config::from_env();
        assert_eq!(cfg.default_version_ref().unwrap().as_str(), "4.0.2");
        unsafe { std::env::remove_var(VERSION_ENV) };
    }

    #[test]
    fn test_default_has_no_version() {
        let cfg = Config::new();
        assert!(cfg.default_version_ref().is_none());
    }
}
