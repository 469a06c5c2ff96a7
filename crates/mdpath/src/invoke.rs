//! Subprocess invoker abstractions.
//!
//! The decision tree in [`machine`](crate::machine) is pure; these
//! traits own the spawning. One blocking and one asynchronous contract,
//! each with a production implementation over the same [`Config`]
//! knobs. Tests substitute scripted invokers to drive both modes from
//! identical outputs.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::machine::Probe;
use std::future::Future;

/// Blocking probe execution.
pub trait Invoke {
    /// Run the probe to completion on the calling thread and return its
    /// trimmed stdout.
    fn invoke(&self, probe: &Probe) -> Result<String>;
}

/// Asynchronous probe execution.
///
/// Implementations must be cancel-safe at probe granularity: dropping
/// the returned future abandons the child process wait but the machine
/// is never advanced with a partial result.
pub trait InvokeAsync: Send + Sync {
    fn invoke(&self, probe: &Probe) -> impl Future<Output = Result<String>> + Send;
}

/// Production invoker spawning real lookup subprocesses.
#[derive(Debug, Clone)]
pub struct ShellInvoker {
    config: Config,
}

impl ShellInvoker {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn display(probe: &Probe) -> String {
        let (program, args) = probe.command();
        let mut display = program.to_string();
        for arg in &args {
            display.push(' ');
            display.push_str(arg);
        }
        display
    }
}

impl Invoke for ShellInvoker {
    fn invoke(&self, probe: &Probe) -> Result<String> {
        let (program, args) = probe.command();
        let mut cmd = mdpath_platform::command::Command::new(program).args(args);
        cmd = cmd.envs(
            self.config
                .envs_ref()
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        if let Some(dir) = self.config.current_dir_ref() {
            cmd = cmd.current_dir(dir.clone());
        }
        let cmd_display = cmd.display().to_string();
        tracing::debug!(cmd = %cmd_display, "running lookup command");
        cmd.capture_stdout().map_err(|e| Error::Subprocess {
            cmd: cmd_display,
            source: e.into_io(),
        })
    }
}

impl InvokeAsync for ShellInvoker {
    async fn invoke(&self, probe: &Probe) -> Result<String> {
        let (program, args) = probe.command();
        let cmd_display = Self::display(probe);
        tracing::debug!(cmd = %cmd_display, "running lookup command");

        let mut cmd = tokio::process::Command::new(program);
        cmd.args(&args)
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true);
        for (key, val) in self.config.envs_ref() {
            cmd.env(key, val);
        }
        if let Some(dir) = self.config.current_dir_ref() {
            cmd.current_dir(dir);
        }

        let waited = match self.config.timeout_ref() {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| Error::Subprocess {
                    cmd: cmd_display.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        format!("lookup command exceeded {limit:?}"),
                    ),
                })?,
            None => cmd.output().await,
        };

        let output = waited.map_err(|e| Error::Subprocess {
            cmd: cmd_display.clone(),
            source: e,
        })?;
        let stdout = String::from_utf8(output.stdout).map_err(|_| Error::Subprocess {
            cmd: cmd_display,
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "non-utf8 output"),
        })?;
        Ok(stdout.trim().to_string())
    }
}
