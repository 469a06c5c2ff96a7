//! Operating system family detection.

use once_cell::sync::Lazy;
use sysinfo::System;

/// Operating system families the resolver distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OS {
    Linux,
    Macos,
    Windows,
    Unknown,
}

impl OS {
    /// Whether the `which`-style binary locator applies on this family.
    pub fn is_unix_like(self) -> bool {
        matches!(self, OS::Linux | OS::Macos)
    }
}

static HOST_OS: Lazy<OS> = Lazy::new(load);

fn load() -> OS {
    match System::name().as_deref() {
        Some("Windows") => OS::Windows,
        Some("macOS") | Some("Darwin") => OS::Macos,
        Some(name) if name.starts_with("Linux") || name.contains("Linux") => OS::Linux,
        _ => OS::Unknown,
    }
}

/// Detect the current operating system family. Cached after first call.
pub fn detect() -> OS {
    *HOST_OS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_is_stable() {
        assert_eq!(detect(), detect());
    }

    #[test]
    fn test_unix_like_families() {
        assert!(OS::Linux.is_unix_like());
        assert!(OS::Macos.is_unix_like());
        assert!(!OS::Windows.is_unix_like());
        assert!(!OS::Unknown.is_unix_like());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_detect_linux() {
        assert_eq!(detect(), OS::Linux);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_detect_macos() {
        assert_eq!(detect(), OS::Macos);
    }
}
