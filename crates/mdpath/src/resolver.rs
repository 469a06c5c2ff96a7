//! Public resolution surface.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::invoke::{Invoke, InvokeAsync, ShellInvoker};
use crate::machine::{Resolution, Step};
use mdpath_platform::os::{self, OS};
use mdpath_version::Version;
use std::path::PathBuf;

/// Resolves the filesystem path to the MongoDB server executable.
///
/// Each call owns its own probe lifecycle; a `Resolver` holds no state
/// beyond its [`Config`] and may be shared freely across callers.
/// Concurrent resolutions are independent and may spawn redundant
/// subprocesses; there is no cross-call cache.
#[derive(Debug, Clone)]
pub struct Resolver {
    config: Config,
}

impl Resolver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolver configured from the process environment.
    pub fn from_env() -> Self {
        Self::new(Config::from_env())
    }

    /// Resolve on the calling thread, blocking on each subprocess.
    ///
    /// `version` must be dotted-numeric when given; otherwise the
    /// configured default applies, and with no default the locator
    /// short-circuit is allowed.
    pub fn resolve_blocking(&self, version: Option<&str>) -> Result<PathBuf> {
        let invoker = ShellInvoker::new(self.config.clone());
        self.resolve_blocking_with(&invoker, version)
    }

    /// Like [`resolve_blocking`](Resolver::resolve_blocking), with a
    /// caller-supplied invoker. The seam tests use to script probe
    /// outputs without spawning processes.
    pub fn resolve_blocking_with(
        &self,
        invoker: &impl Invoke,
        version: Option<&str>,
    ) -> Result<PathBuf> {
        let requested = self.requested(version)?;
        resolve_on_blocking(os::detect(), invoker, requested)
    }

    /// Resolve asynchronously, awaiting each subprocess in turn.
    ///
    /// Identical outcome semantics to [`resolve_blocking`]; only the
    /// waiting differs. The future completes exactly once with either
    /// a path or an error.
    ///
    /// [`resolve_blocking`]: Resolver::resolve_blocking
    pub async fn resolve(&self, version: Option<&str>) -> Result<PathBuf> {
        let invoker = ShellInvoker::new(self.config.clone());
        self.resolve_with(&invoker, version).await
    }

    /// Like [`resolve`](Resolver::resolve), with a caller-supplied invoker.
    pub async fn resolve_with(
        &self,
        invoker: &impl InvokeAsync,
        version: Option<&str>,
    ) -> Result<PathBuf> {
        let requested = self.requested(version)?;
        resolve_on_async(os::detect(), invoker, requested).await
    }

    fn requested(&self, version: Option<&str>) -> Result<Option<Version>> {
        match version {
            Some(raw) => Ok(Some(Version::parse(raw)?)),
            None => Ok(self.config.default_version_ref().cloned()),
        }
    }
}

/// Platform gate shared by both modes. Rejects before any probe runs.
fn gate(host: OS) -> Result<()> {
    match host {
        OS::Linux | OS::Macos => Ok(()),
        OS::Windows => Err(Error::UnsupportedPlatform),
        OS::Unknown => Err(Error::UnknownPlatform),
    }
}

fn resolve_on_blocking(
    host: OS,
    invoker: &impl Invoke,
    requested: Option<Version>,
) -> Result<PathBuf> {
    gate(host)?;
    drive_blocking(invoker, requested)
}

async fn resolve_on_async(
    host: OS,
    invoker: &impl InvokeAsync,
    requested: Option<Version>,
) -> Result<PathBuf> {
    gate(host)?;
    drive_async(invoker, requested).await
}

fn drive_blocking(invoker: &impl Invoke, requested: Option<Version>) -> Result<PathBuf> {
    let (mut machine, mut probe) = Resolution::start(requested);
    loop {
        let output = invoker.invoke(&probe)?;
        match machine.advance(&output) {
            Step::Run(next) => probe = next,
            Step::Done(path) => return Ok(path),
            Step::Fail(error) => return Err(error),
        }
    }
}

async fn drive_async(invoker: &impl InvokeAsync, requested: Option<Version>) -> Result<PathBuf> {
    let (mut machine, mut probe) = Resolution::start(requested);
    loop {
        let output = invoker.invoke(&probe).await?;
        match machine.advance(&output) {
            Step::Run(next) => probe = next,
            Step::Done(path) => return Ok(path),
            Step::Fail(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::machine::Probe;
    use std::sync::Mutex;

    /// Scripted invoker answering probes from a fixed table, recording
    /// every probe it is asked to run.
    struct Scripted {
        responses: Vec<(Probe, Result<String>)>,
        seen: Mutex<Vec<Probe>>,
    }

    impl Scripted {
        fn new(responses: Vec<(Probe, Result<String>)>) -> Self {
            Self {
                responses,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn answer(&self, probe: &Probe) -> Result<String> {
            self.seen.lock().unwrap().push(probe.clone());
            for (expected, response) in &self.responses {
                if expected == probe {
                    return match response {
                        Ok(s) => Ok(s.clone()),
                        Err(_) => Err(Error::Subprocess {
                            cmd: "scripted".into(),
                            source: std::io::Error::other("scripted failure"),
                        }),
                    };
                }
            }
            panic!("unscripted probe: {probe:?}");
        }

        fn seen(&self) -> Vec<Probe> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Invoke for Scripted {
        fn invoke(&self, probe: &Probe) -> Result<String> {
            self.answer(probe)
        }
    }

    impl InvokeAsync for Scripted {
        async fn invoke(&self, probe: &Probe) -> Result<String> {
            self.answer(probe)
        }
    }

    fn locator_hit() -> Scripted {
        Scripted::new(vec![(Probe::Locator, Ok("/usr/bin/mongod".into()))])
    }

    fn full_fallback() -> Scripted {
        Scripted::new(vec![
            (Probe::Locator, Ok(String::new())),
            (Probe::ManagerLookup(String::new()), Ok(String::new())),
            (Probe::Discovery, Ok("3.6.4\n4.0.2".into())),
            (
                Probe::ManagerLookup("4.0.2".into()),
                Ok("/m/4.0.2/bin/mongod".into()),
            ),
        ])
    }

    #[test]
    fn test_gate_rejects_windows_and_unknown() {
        assert_eq!(gate(OS::Windows).unwrap_err().kind(), ErrorKind::UnsupportedPlatform);
        assert_eq!(gate(OS::Unknown).unwrap_err().kind(), ErrorKind::UnknownPlatform);
        assert!(gate(OS::Linux).is_ok());
        assert!(gate(OS::Macos).is_ok());
    }

    #[test]
    fn test_windows_rejected_before_any_probe() {
        let invoker = locator_hit();
        let err = resolve_on_blocking(OS::Windows, &invoker, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedPlatform);
        assert!(invoker.seen().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_platform_rejected_before_any_probe() {
        let invoker = locator_hit();
        let err = resolve_on_async(OS::Unknown, &invoker, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownPlatform);
        assert!(invoker.seen().is_empty());
    }

    #[test]
    fn test_blocking_locator_hit() {
        let invoker = locator_hit();
        let path = drive_blocking(&invoker, None).unwrap();
        assert_eq!(path, PathBuf::from("/usr/bin/mongod"));
        assert_eq!(invoker.seen(), vec![Probe::Locator]);
    }

    #[test]
    fn test_blocking_full_fallback_chain() {
        let invoker = full_fallback();
        let path = drive_blocking(&invoker, None).unwrap();
        assert_eq!(path, PathBuf::from("/m/4.0.2/bin/mongod"));
        assert_eq!(invoker.seen().len(), 4);
    }

    #[test]
    fn test_blocking_requested_version_goes_to_manager() {
        let invoker = Scripted::new(vec![
            (Probe::Locator, Ok("/usr/bin/mongod".into())),
            (
                Probe::ManagerLookup("3.6.4".into()),
                Ok("/m/3.6.4/bin/mongod".into()),
            ),
        ]);
        let requested = Some(Version::parse("3.6.4").unwrap());
        let path = drive_blocking(&invoker, requested).unwrap();
        assert_eq!(path, PathBuf::from("/m/3.6.4/bin/mongod"));
        assert_eq!(
            invoker.seen(),
            vec![Probe::Locator, Probe::ManagerLookup("3.6.4".into())]
        );
    }

    #[test]
    fn test_blocking_nothing_installed() {
        let invoker = Scripted::new(vec![
            (Probe::Locator, Ok(String::new())),
            (Probe::ManagerLookup(String::new()), Ok(String::new())),
            (Probe::Discovery, Ok(String::new())),
        ]);
        let err = drive_blocking(&invoker, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotInstalled);
    }

    #[test]
    fn test_blocking_subprocess_failure_aborts() {
        let invoker = Scripted::new(vec![(
            Probe::Locator,
            Err(Error::NotInstalled), // placeholder, rewrapped as Subprocess
        )]);
        let err = drive_blocking(&invoker, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Subprocess);
        assert_eq!(invoker.seen(), vec![Probe::Locator]);
    }

    #[tokio::test]
    async fn test_async_matches_blocking_on_locator_hit() {
        let blocking = drive_blocking(&locator_hit(), None).unwrap();
        let deferred = drive_async(&locator_hit(), None).await.unwrap();
        assert_eq!(blocking, deferred);
    }

    #[tokio::test]
    async fn test_async_matches_blocking_on_full_fallback() {
        let blocking = drive_blocking(&full_fallback(), None).unwrap();
        let deferred = drive_async(&full_fallback(), None).await.unwrap();
        assert_eq!(blocking, deferred);
    }

    #[tokio::test]
    async fn test_async_matches_blocking_on_failure_kind() {
        let script = || {
            Scripted::new(vec![
                (Probe::Locator, Ok(String::new())),
                (Probe::ManagerLookup(String::new()), Ok(String::new())),
                (Probe::Discovery, Ok("no versions installed".into())),
            ])
        };
        let blocking = drive_blocking(&script(), None).unwrap_err();
        let deferred = drive_async(&script(), None).await.unwrap_err();
        assert_eq!(blocking.kind(), deferred.kind());
        assert_eq!(blocking.kind(), ErrorKind::NotInstalled);
    }

    #[test]
    fn test_resolver_rejects_malformed_version() {
        let resolver = Resolver::new(Config::new());
        let err = resolver.resolve_blocking(Some("latest")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidVersion);
    }
}
