//! The dotted-numeric version type.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static VERSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.)+\d+$").unwrap());

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid dotted-numeric version: {0}")]
pub struct VersionError(pub String);

/// A dotted-numeric version such as `3.6.4`.
///
/// At least two components are required; there is no upper bound on
/// component count. Ordering is component-wise numeric, with missing
/// trailing components treated as zero (`4.0` == `4.0.0`).
#[derive(Debug, Clone, Eq)]
pub struct Version {
    components: Vec<u64>,
    raw: String,
}

impl Version {
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let s = s.trim();
        if !VERSION_REGEX.is_match(s) {
            return Err(VersionError(s.to_string()));
        }
        let components = s
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| VersionError(s.to_string()))?;
        Ok(Self {
            components,
            raw: s.to_string(),
        })
    }

    /// Whether a string is a plausible version without constructing one.
    pub fn is_match(s: &str) -> bool {
        VERSION_REGEX.is_match(s.trim())
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// The version exactly as it was written, for passing back to the
    /// version manager.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                std::cmp::Ordering::Equal => continue,
                ord => return ord,
            }
        }
        std::cmp::Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        for s in ["3.6.4", "4.0", "10.2.14.1", "0.0"] {
            assert!(Version::parse(s).is_ok(), "{s} should parse");
        }
    }

    #[test]
    fn test_parse_invalid() {
        for s in ["", "3", "3.", ".6", "v3.6", "latest", "3.6-rc1", "3 .6"] {
            assert!(Version::parse(s).is_err(), "{s} should be rejected");
        }
    }

    #[test]
    fn test_parse_trims() {
        assert_eq!(Version::parse("  3.6.4\n").unwrap().as_str(), "3.6.4");
    }

    #[test]
    fn test_ordering_numeric_not_lexicographic() {
        let a = Version::parse("3.10.0").unwrap();
        let b = Version::parse("3.9.0").unwrap();
        assert!(a > b);
    }

    #[test]
    fn test_ordering_missing_components_are_zero() {
        let a = Version::parse("4.0").unwrap();
        let b = Version::parse("4.0.0").unwrap();
        assert_eq!(a, b);
        let c = Version::parse("4.0.1").unwrap();
        assert!(c > a);
    }

    #[test]
    fn test_display_roundtrip() {
        let v = Version::parse("3.6.4").unwrap();
        assert_eq!(v.to_string(), "3.6.4");
    }
}
