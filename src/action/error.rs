use std::fmt;

use thiserror::Error;

use super::registers::RegisterRole;

/// How loudly a rejected match attempt is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Severe,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Severe => write!(f, "severe"),
        }
    }
}

/// Why one class-detection attempt was abandoned.
///
/// Never escapes the detector: the scanner reports it and moves on.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MatchError {
    #[error("not a register - {0}")]
    NotARegister(&'static str),

    #[error("no constructor found")]
    MissingConstructor,

    #[error("register {register} already holds the {held} object")]
    RoleConflict { register: u32, held: RegisterRole },

    #[error("{found} found where {expected} was expected")]
    UnexpectedNode {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Assertion(String),
}

impl MatchError {
    pub fn assertion(message: impl Into<String>) -> Self {
        MatchError::Assertion(message.into())
    }

    pub fn unexpected(expected: &'static str, found: &super::item::Item) -> Self {
        MatchError::UnexpectedNode {
            expected,
            found: found.kind_name(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            MatchError::UnexpectedNode { .. } => Severity::Severe,
            _ => Severity::Warning,
        }
    }

    /// Message handed to the diagnostic sink.
    pub fn diagnostic_message(&self) -> String {
        match self.severity() {
            Severity::Severe => {
                format!("Cannot detect class - unexpected node kind, aborting scan: {}", self)
            }
            Severity::Warning => {
                format!("Cannot detect class - structural assertion failed: {}", self)
            }
        }
    }
}
