//! Builder-style wrapper over [`std::process::Command`] for one-shot
//! stdout-capturing invocations.

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command as StdCommand, Output, Stdio};

#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    display: String,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        Self {
            inner: StdCommand::new(&program),
            display: program,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.display.push(' ');
        self.display.push_str(&arg.as_ref().to_string_lossy());
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    pub fn env<K, V>(mut self, key: K, val: V) -> Self
    where
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.inner.env(key, val);
        self
    }

    pub fn envs<'a, I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, val) in vars {
            self.inner.env(key, val);
        }
        self
    }

    pub fn current_dir(mut self, dir: PathBuf) -> Self {
        self.inner.current_dir(dir);
        self
    }

    /// The command line as it will be reported in errors and logs.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn capture(mut self) -> Result<Output> {
        self.inner.stdin(Stdio::null());
        self.inner.output().map_err(|e| Error::CommandFailed {
            cmd: self.display.clone(),
            source: e,
        })
    }

    /// Run the command and return its trimmed standard output.
    ///
    /// A non-zero exit status is not an error here: locator-style tools
    /// signal "not found" with an empty stdout and a failing status, and
    /// callers branch on emptiness. Only failure to run the process at
    /// all is reported as an error.
    pub fn capture_stdout(self) -> Result<String> {
        let cmd_display = self.display.clone();
        let output = self.capture()?;
        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| Error::NonUtf8Output { cmd: cmd_display.clone() })?;
        tracing::trace!(cmd = %cmd_display, bytes = stdout.len(), "captured stdout");
        Ok(stdout.trim().to_string())
    }
}
