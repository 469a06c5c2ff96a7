//! Dotted-numeric version handling for the MongoDB version manager.
//!
//! MongoDB release identifiers are plain dotted numerics (`3.6.4`,
//! `4.0`, occasionally four components). They are not semver: there is
//! no prerelease or build metadata, and two-component versions are
//! common. [`Version`] keeps the components as numbers so ordering is
//! numeric, not lexicographic.

pub use listing::newest_installed;
pub use version::{Version, VersionError};

mod listing;
mod version;
