use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("command failed: {cmd}, source: {source}")]
    CommandFailed { cmd: String, source: std::io::Error },

    #[error("command produced non-utf8 output: {cmd}")]
    NonUtf8Output { cmd: String },
}

impl Error {
    /// The underlying I/O failure, if one exists.
    pub fn into_io(self) -> std::io::Error {
        match self {
            Error::CommandFailed { source, .. } => source,
            Error::NonUtf8Output { cmd } => std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("non-utf8 output from {cmd}"),
            ),
        }
    }
}
