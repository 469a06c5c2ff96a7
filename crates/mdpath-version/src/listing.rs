//! Discovery of the newest installed version from version-manager output.

use crate::version::Version;

/// Pick the newest version from a version-manager listing.
///
/// The `m ls` output is one version per line, with the active version
/// prefixed by a marker (`o`, `*`, or an arrow) and possibly decorated
/// with a trailing annotation. Lines that do not contain a
/// dotted-numeric version are skipped. Returns `None` when the listing
/// carries no versions at all.
pub fn newest_installed(listing: &str) -> Option<Version> {
    listing
        .lines()
        .filter_map(parse_line)
        .max()
}

fn parse_line(line: &str) -> Option<Version> {
    let stripped = line
        .trim()
        .trim_start_matches(['o', '*', '>', '→', '-', ' ', '\t']);
    let token = stripped.split_whitespace().next()?;
    Version::parse(token).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing() {
        assert_eq!(newest_installed(""), None);
        assert_eq!(newest_installed("\n  \n"), None);
    }

    #[test]
    fn test_single_version() {
        let v = newest_installed("3.6.4\n").unwrap();
        assert_eq!(v.as_str(), "3.6.4");
    }

    #[test]
    fn test_picks_newest_numerically() {
        let listing = "3.6.4\n3.10.1\n3.9.0\n";
        assert_eq!(newest_installed(listing).unwrap().as_str(), "3.10.1");
    }

    #[test]
    fn test_active_markers_are_stripped() {
        let listing = "  3.4.10\no 3.6.4\n  4.0.2\n";
        assert_eq!(newest_installed(listing).unwrap().as_str(), "4.0.2");
    }

    #[test]
    fn test_noise_lines_are_skipped() {
        let listing = "\ninstalled versions:\n  3.6.4 (active)\n  4.0.0\nrun `m use` to switch\n";
        assert_eq!(newest_installed(listing).unwrap().as_str(), "4.0.0");
    }
}
