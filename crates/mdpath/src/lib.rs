//! Resolve the path to a locally installed MongoDB server executable.
//!
//! # Architecture
//!
//! Resolution is a short fixed fallback chain: ask the system binary
//! locator for `mongod`, fall back to the `m` version manager, and as a
//! last resort discover the newest installed version and retry the
//! manager with it. The chain is implemented once, as a pure state
//! machine ([`machine::Resolution`]), and driven by either a blocking
//! or an asynchronous subprocess invoker. Both modes produce identical
//! outcomes; only the waiting differs.
//!
//! # Example
//!
//! ```no_run
//! use mdpath::{Config, Resolver};
//!
//! let resolver = Resolver::new(Config::from_env());
//! let path = resolver.resolve_blocking(None)?;
//! println!("{}", path.display());
//! # Ok::<(), mdpath::Error>(())
//! ```

pub use config::{Config, VERSION_ENV};
pub use error::{Error, ErrorKind, Result};
pub use mdpath_version::{Version, VersionError};
pub use resolver::Resolver;

mod config;
mod error;
pub mod invoke;
pub mod machine;
mod resolver;
