//! Producer version recorded in serialized logs.

use std::fmt;
use std::str::FromStr;

/// Version string written into every serialized log.
pub const FORMAT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A parsed `major.minor.patch` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// Error returned when a version string is not dotted numeric.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version '{raw}': expected MAJOR[.MINOR[.PATCH]]")]
pub struct InvalidVersion {
    pub raw: String,
}

impl FormatVersion {
    /// The version of this build.
    #[must_use]
    pub fn current() -> Self {
        FORMAT_VERSION.parse().unwrap_or(Self {
            major: 0,
            minor: 0,
            patch: 0,
        })
    }

    /// Same major version.
    #[must_use]
    pub const fn is_compatible_with(self, other: Self) -> bool {
        self.major == other.major
    }
}

impl FromStr for FormatVersion {
    type Err = InvalidVersion;

    /// Missing minor or patch components read as zero.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidVersion {
            raw: raw.to_string(),
        };

        let mut parts = [0u32; 3];
        let mut count = 0;
        for part in raw.trim().split('.') {
            if count == parts.len() {
                return Err(invalid());
            }
            parts[count] = part.parse().map_err(|_| invalid())?;
            count += 1;
        }

        Ok(Self {
            major: parts[0],
            minor: parts[1],
            patch: parts[2],
        })
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_short_versions() {
        let v: FormatVersion = "1.2.0".parse().expect("valid");
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 0));

        let short: FormatVersion = "3".parse().expect("valid");
        assert_eq!(short.to_string(), "3.0.0");
    }

    #[test]
    fn rejects_non_numeric_versions() {
        for raw in ["", "1.x", "1.2.3.4", "v1", "1..2"] {
            assert!(raw.parse::<FormatVersion>().is_err(), "{raw}");
        }
    }

    #[test]
    fn compatibility_follows_major() {
        let a: FormatVersion = "1.2.0".parse().expect("valid");
        let b: FormatVersion = "1.9.4".parse().expect("valid");
        let c: FormatVersion = "2.0.0".parse().expect("valid");
        assert!(a.is_compatible_with(b));
        assert!(!a.is_compatible_with(c));
    }

    #[test]
    fn current_matches_crate_version() {
        assert_eq!(FormatVersion::current().to_string(), FORMAT_VERSION);
    }
}
