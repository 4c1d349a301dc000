use std::fmt;

/// Machine-readable error codes for scripts consuming `owl` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ChronologyViolation,
    MalformedSerializedInput,
    UnsupportedVersion,
    IndexOutOfRange,
    EmptyRange,
    FileReadFailed,
    FileWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::ChronologyViolation => "E2001",
            Self::MalformedSerializedInput => "E3001",
            Self::UnsupportedVersion => "E3002",
            Self::IndexOutOfRange => "E4001",
            Self::EmptyRange => "E4002",
            Self::FileReadFailed => "E5001",
            Self::FileWriteFailed => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ChronologyViolation => "Entry is older than the previous entry",
            Self::MalformedSerializedInput => "Malformed consolidated log",
            Self::UnsupportedVersion => "Unsupported consolidated log version",
            Self::IndexOutOfRange => "Index out of range",
            Self::EmptyRange => "Log has no entries",
            Self::FileReadFailed => "File read failed",
            Self::FileWriteFailed => "File write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .owl/config.toml and retry."),
            Self::ChronologyViolation => Some(
                "Pass log files in chronological order, or consolidate them separately and merge the .json outputs.",
            ),
            Self::MalformedSerializedInput => {
                Some("Regenerate the file with `owl consolidate` from the original logs.")
            }
            Self::UnsupportedVersion => Some("Upgrade owl to read files from newer releases."),
            Self::IndexOutOfRange | Self::EmptyRange => None,
            Self::FileReadFailed => Some("Check that the path exists and is readable."),
            Self::FileWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors returned by the consolidation engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OwlError {
    /// A raw entry was appended with a timestamp older than the last entry.
    ///
    /// The consolidator is left exactly as it was before the call.
    #[error(
        "entry #{position} has timestamp {timestamp}, older than the last appended entry at {last}"
    )]
    Chronology {
        /// Position the rejected entry would have taken in the buffer.
        position: usize,
        timestamp: i64,
        last: i64,
    },

    /// A serialized blob is missing a section, has the wrong shape, or
    /// references a dictionary index that does not exist.
    #[error("malformed serialized input: {0}")]
    MalformedInput(String),

    /// Positional access past the end of a view.
    #[error("index {index} out of range for view of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A time range was requested from a log with no entries.
    #[error("cannot compute the time range of an empty log")]
    EmptyRange,
}

impl OwlError {
    /// The stable error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Chronology { .. } => ErrorCode::ChronologyViolation,
            Self::MalformedInput(_) => ErrorCode::MalformedSerializedInput,
            Self::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
            Self::EmptyRange => ErrorCode::EmptyRange,
        }
    }
}

impl From<serde_json::Error> for OwlError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedInput(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, OwlError};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigParseError,
            ErrorCode::ChronologyViolation,
            ErrorCode::MalformedSerializedInput,
            ErrorCode::UnsupportedVersion,
            ErrorCode::IndexOutOfRange,
            ErrorCode::EmptyRange,
            ErrorCode::FileReadFailed,
            ErrorCode::FileWriteFailed,
            ErrorCode::InternalUnexpected,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::ChronologyViolation.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn chronology_error_names_the_entry() {
        let err = OwlError::Chronology {
            position: 1,
            timestamp: 50,
            last: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("#1"));
        assert!(msg.contains("50"));
        assert!(msg.contains("100"));
        assert_eq!(err.code(), ErrorCode::ChronologyViolation);
    }

    #[test]
    fn json_errors_become_malformed_input() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{invalid")
            .expect_err("invalid JSON must fail");
        let err = OwlError::from(parse_err);
        assert!(matches!(err, OwlError::MalformedInput(_)));
        assert_eq!(err.code(), ErrorCode::MalformedSerializedInput);
    }
}
