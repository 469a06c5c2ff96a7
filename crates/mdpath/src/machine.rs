//! The resolution decision tree as an explicit state machine.
//!
//! One implementation of the lookup logic serves both execution modes.
//! The machine is pure: it never spawns anything. A driver runs the
//! [`Probe`] the machine asks for, feeds the captured stdout back
//! through [`Resolution::advance`], and acts on the returned [`Step`].
//! States advance in a fixed order — locator lookup, version-manager
//! lookup, version discovery, version-manager retry — with exactly one
//! probe in flight at a time.

use crate::error::Error;
use mdpath_platform::path;
use mdpath_version::{Version, newest_installed};
use std::path::PathBuf;

/// A subprocess the driver must run next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// `which mongod` — an already-installed binary on the search path.
    Locator,
    /// `m bin <version>` — ask the version manager, installing on demand.
    /// The version may be empty, which queries the active version.
    ManagerLookup(String),
    /// `m ls` — list installed versions for discovery.
    Discovery,
}

impl Probe {
    /// Program and arguments to spawn, shell-free.
    pub fn command(&self) -> (&'static str, Vec<String>) {
        match self {
            Probe::Locator => ("which", vec!["mongod".to_string()]),
            Probe::ManagerLookup(version) => {
                let mut args = vec!["bin".to_string()];
                if !version.is_empty() {
                    args.push(version.clone());
                }
                ("m", args)
            }
            Probe::Discovery => ("m", vec!["ls".to_string()]),
        }
    }
}

/// Outcome of feeding one probe result into the machine.
#[derive(Debug)]
pub enum Step {
    /// Run this probe and call [`Resolution::advance`] with its stdout.
    Run(Probe),
    /// Resolution finished with this path.
    Done(PathBuf),
    /// Resolution failed; no further probes may run.
    Fail(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    LocatorLookup,
    ManagerLookup,
    Discovery,
    ManagerRetry,
    Finished,
}

/// A single in-flight resolution.
#[derive(Debug)]
pub struct Resolution {
    state: State,
    requested: Option<Version>,
}

impl Resolution {
    /// Begin a resolution. Returns the machine and the first probe.
    ///
    /// The platform gate has already been passed by the caller; the
    /// machine itself assumes a Unix-like host.
    pub fn start(requested: Option<Version>) -> (Self, Probe) {
        (
            Self {
                state: State::LocatorLookup,
                requested,
            },
            Probe::Locator,
        )
    }

    fn requested_string(&self) -> String {
        self.requested
            .as_ref()
            .map(|v| v.as_str().to_string())
            .unwrap_or_default()
    }

    /// Feed the trimmed stdout of the previous probe and get the next step.
    ///
    /// # Panics
    ///
    /// Panics if called again after a `Done` or `Fail` step was returned.
    pub fn advance(&mut self, output: &str) -> Step {
        match self.state {
            State::LocatorLookup => {
                let found = path::normalize_output(output);
                match found {
                    // An explicit version request always goes through the
                    // version manager, even when a binary is on the path.
                    Some(p) if self.requested.is_none() => {
                        tracing::debug!(path = %p.display(), "resolved via binary locator");
                        self.state = State::Finished;
                        Step::Done(p)
                    }
                    _ => {
                        self.state = State::ManagerLookup;
                        Step::Run(Probe::ManagerLookup(self.requested_string()))
                    }
                }
            }
            State::ManagerLookup => {
                if path::is_blank(output) {
                    self.state = State::Discovery;
                    Step::Run(Probe::Discovery)
                } else {
                    tracing::debug!(path = output, "resolved via version manager");
                    self.state = State::Finished;
                    Step::Done(PathBuf::from(output.trim()))
                }
            }
            State::Discovery => match newest_installed(output) {
                None => {
                    self.state = State::Finished;
                    Step::Fail(Error::NotInstalled)
                }
                Some(version) => {
                    tracing::debug!(%version, "discovered installed version");
                    self.state = State::ManagerRetry;
                    Step::Run(Probe::ManagerLookup(version.as_str().to_string()))
                }
            },
            // The retry result is final as-is. An empty path here is
            // returned to the caller rather than escalated; see the
            // resolution notes in DESIGN.md.
            State::ManagerRetry => {
                self.state = State::Finished;
                Step::Done(PathBuf::from(output.trim()))
            }
            State::Finished => unreachable!("resolution already finished"),
        }
    }
}
