//! Shared primitives for all Rust crates in Voltdesk.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across Voltdesk crates.
pub type AppResult<T> = Result<T, AppError>;

/// Application error categories.
///
/// Remote failures are mapped to these kinds by the transport layer so the
/// rest of the code never branches on wire-level status codes. Validation and
/// mismatch errors are produced locally and never reach the central server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A form field violates its validation rule.
    #[error("field '{field}' is invalid: {message}")]
    Validation {
        /// The offending form field.
        field: &'static str,
        /// What rule the value violated.
        message: String,
    },

    /// Two fields that must agree do not.
    #[error("fields '{first}' and '{second}' do not match")]
    Mismatch {
        /// First field of the pair.
        first: &'static str,
        /// Second field of the pair.
        second: &'static str,
    },

    /// The requested record does not exist on the central server.
    #[error("not found: {0}")]
    NotFound(String),

    /// The email address is already registered.
    #[error("email address already in use: {0}")]
    DuplicateEmail(String),

    /// The badge identifier is already assigned to another user.
    #[error("badge identifier already in use: {0}")]
    DuplicateTagId(String),

    /// The record was deleted on the central server while being edited.
    #[error("record no longer exists: {0}")]
    EntityGone(String),

    /// Catch-all for transport and backend failures.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    /// Creates a field validation error.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns a stable kind label for log lines.
    #[must_use]
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Mismatch { .. } => "mismatch",
            Self::NotFound(_) => "not_found",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::DuplicateTagId(_) => "duplicate_tag_id",
            Self::EntityGone(_) => "entity_gone",
            Self::Unexpected(_) => "unexpected",
        }
    }

    /// Returns whether the error was produced by local form validation.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Mismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn validation_error_names_the_field() {
        let error = AppError::validation("email", "must contain '@'");
        assert!(error.to_string().contains("email"));
        assert!(error.is_local());
    }

    #[test]
    fn remote_errors_are_not_local() {
        assert!(!AppError::NotFound("user".to_owned()).is_local());
        assert!(!AppError::Unexpected("boom".to_owned()).is_local());
    }
}
