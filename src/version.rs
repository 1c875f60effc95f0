//! Semantic versions and build identities.
//!
//! A [`Build`] names which revision of a package a tool should run as: a
//! tagged release or the latest development head.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::locale::{Locale, Text};

static VERSION_IN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").unwrap());

/// `major.minor.patch`, ordered component by component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// One to three dot-separated decimal components; missing ones are zero.
    pub fn parse(raw: &str) -> Option<Version> {
        let parts: Vec<&str> = raw.split('.').collect();
        if parts.is_empty() || parts.len() > 3 {
            return None;
        }
        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            *slot = part.parse().ok()?;
        }
        Some(Version::new(numbers[0], numbers[1], numbers[2]))
    }

    /// First version-looking run in free text such as `git version 2.39.2`.
    pub fn find_in(text: &str) -> Option<Version> {
        for token in text.split_whitespace() {
            if let Ok(v) = semver::Version::parse(token.trim_start_matches('v')) {
                return Some(v.into());
            }
        }
        let caps = VERSION_IN_TEXT.captures(text)?;
        let component = |i: usize| {
            caps.get(i)
                .map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
        };
        Some(Version::new(component(1)?, component(2)?, component(3)?))
    }

    /// Versions that promise the same interface: `[self, next breaking)`.
    pub fn compatible_versions(&self) -> Range<Version> {
        let upper = if self.major == 0 {
            Version::new(0, self.minor.saturating_add(1), 0)
        } else {
            Version::new(self.major.saturating_add(1), 0, 0)
        };
        *self..upper
    }

    pub fn is_compatible_with(&self, other: &Version) -> bool {
        self.compatible_versions().contains(other)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = semver::Error;

    /// Accepts full semver, dropping pre-release and build metadata.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Version::parse(s) {
            Some(v) => Ok(v),
            None => semver::Version::parse(s).map(Version::from),
        }
    }
}

impl From<semver::Version> for Version {
    fn from(v: semver::Version) -> Self {
        Version::new(v.major, v.minor, v.patch)
    }
}

impl From<Version> for semver::Version {
    fn from(v: Version) -> Self {
        semver::Version::new(v.major, v.minor, v.patch)
    }
}

/// Which revision of a package to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Build {
    Version(Version),
    /// The latest commit of the source repository; unversioned.
    Development,
}

impl Build {
    pub fn development_name() -> Text {
        Text::table(&[
            (Locale::English, "development"),
            (Locale::German, "Entwicklung"),
            (Locale::French, "développement"),
        ])
    }

    pub fn parse(raw: &str) -> Option<Build> {
        if Build::development_name()
            .aliases()
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(raw))
        {
            return Some(Build::Development);
        }
        Version::parse(raw).map(Build::Version)
    }

    pub fn describe(&self, locale: Locale) -> String {
        match self {
            Build::Version(v) => v.to_string(),
            Build::Development => Build::development_name().resolve(locale),
        }
    }
}

impl fmt::Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(Locale::FALLBACK))
    }
}

impl From<Version> for Build {
    fn from(v: Version) -> Self {
        Build::Version(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_strings() {
        assert_eq!(Version::parse("1.2.3").unwrap().to_string(), "1.2.3");
        assert_eq!(Version::parse("1.2").unwrap().to_string(), "1.2.0");
        assert_eq!(Version::parse("7").unwrap(), Version::new(7, 0, 0));
        assert_eq!(Version::parse(""), None);
        assert_eq!(Version::parse("1.2.C"), None);
        assert_eq!(Version::parse("1.2.3.4"), None);
        assert_eq!(Version::parse("1..3"), None);
        assert_eq!(Version::parse("+1.2.3"), None);
    }

    #[test]
    fn ordering_is_by_component() {
        assert!(Version::new(1, 10, 0) > Version::new(1, 9, 9));
        assert!(Version::new(2, 0, 0) > Version::new(1, 99, 99));
        assert!(Version::new(0, 1, 2) < Version::new(0, 1, 3));
    }

    #[test]
    fn compatible_ranges() {
        assert_eq!(
            Version::new(1, 2, 3).compatible_versions(),
            Version::new(1, 2, 3)..Version::new(2, 0, 0)
        );
        assert_eq!(
            Version::new(0, 1, 2).compatible_versions(),
            Version::new(0, 1, 2)..Version::new(0, 2, 0)
        );
        assert!(Version::new(1, 2, 3).is_compatible_with(&Version::new(1, 9, 0)));
        assert!(!Version::new(1, 2, 3).is_compatible_with(&Version::new(2, 0, 0)));
        assert!(!Version::new(1, 2, 3).is_compatible_with(&Version::new(1, 2, 2)));
    }

    #[test]
    fn compatible_range_saturates_at_the_largest_component() {
        let huge: Version = "18446744073709551615.0.0".parse().unwrap();
        assert_eq!(huge.compatible_versions(), huge..huge);
        let zero = Version::new(0, u64::MAX, 1);
        assert_eq!(zero.compatible_versions().end, Version::new(0, u64::MAX, 0));
    }

    #[test]
    fn build_equality() {
        let a = Build::Version(Version::new(1, 0, 0));
        let b = Build::Version(Version::new(1, 0, 1));
        assert_ne!(a, b);
        assert_eq!(a, Build::Version(Version::new(1, 0, 0)));
        assert_eq!(Build::Development, Build::Development);
        assert_ne!(Build::Development, a);
        assert_ne!(Build::Development, Build::Version(Version::new(0, 0, 0)));
    }

    #[test]
    fn build_parsing_accepts_localized_development() {
        assert_eq!(Build::parse("development"), Some(Build::Development));
        assert_eq!(Build::parse("Entwicklung"), Some(Build::Development));
        assert_eq!(Build::parse("developpement"), Some(Build::Development));
        assert_eq!(Build::parse("1.4"), Some(Build::Version(Version::new(1, 4, 0))));
        assert_eq!(Build::parse("latest"), None);
    }

    #[test]
    fn versions_found_in_tool_output() {
        assert_eq!(
            Version::find_in("git version 2.39.2 (Apple Git-143)"),
            Some(Version::new(2, 39, 2))
        );
        assert_eq!(
            Version::find_in("cargo 1.75.0 (1d8b05cdd 2023-11-20)"),
            Some(Version::new(1, 75, 0))
        );
        assert_eq!(Version::find_in("tool v3.1"), Some(Version::new(3, 1, 0)));
        assert_eq!(Version::find_in("no digits here"), None);
    }
}
