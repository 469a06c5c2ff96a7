//! Error taxonomy for binary path resolution.

use mdpath_version::VersionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Windows hosts are recognized but resolution is not implemented.
    #[error("platform not currently supported")]
    UnsupportedPlatform,

    /// The host OS family could not be identified at all.
    #[error("cannot determine platform, platform not supported")]
    UnknownPlatform,

    /// A lookup subprocess could not be run. The original failure is
    /// chained, never swallowed.
    #[error("cannot get path to mongo database executable binary, command failed: {cmd}")]
    Subprocess {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    /// Every lookup strategy was exhausted and discovery found no
    /// installed version.
    #[error("mongo database not installed")]
    NotInstalled,

    /// The requested version does not match the dotted-numeric pattern.
    #[error("cannot get path to mongo database executable binary, {0}")]
    InvalidVersion(#[from] VersionError),
}

impl Error {
    /// Stable discriminant for comparing outcomes across execution modes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedPlatform => ErrorKind::UnsupportedPlatform,
            Error::UnknownPlatform => ErrorKind::UnknownPlatform,
            Error::Subprocess { .. } => ErrorKind::Subprocess,
            Error::NotInstalled => ErrorKind::NotInstalled,
            Error::InvalidVersion(_) => ErrorKind::InvalidVersion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedPlatform,
    UnknownPlatform,
    Subprocess,
    NotInstalled,
    InvalidVersion,
}
