//! Domain-level error type.
//!
//! Transport agnostic: the HTTP adapter maps [`Error`] onto status codes and
//! the response envelope, and nothing in here knows about either. Every
//! failure carries a stable machine-readable kind so clients can branch on
//! the kind rather than on message text.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable machine-readable error kind.
///
/// The serialized form is the wire contract (`TEAM_EXISTS`, `PR_MERGED`, …)
/// and must never change for an existing variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A team with the requested name already exists.
    TeamExists,
    /// A pull request with the requested id already exists.
    PrExists,
    /// The pull request is merged and its reviewer set is frozen.
    PrMerged,
    /// The named reviewer is not currently assigned to the pull request.
    NotAssigned,
    /// No eligible replacement reviewer remains in the candidate pool.
    NoCandidate,
    /// A referenced entity does not exist.
    NotFound,
    /// Unanticipated persistence or infrastructure failure.
    Internal,
}

/// Domain error: a stable kind plus a human-readable cause.
///
/// Constructed at the point of detection and propagated unchanged to the
/// boundary; the core never retries a domain error.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("author not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create an error with an explicit kind.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable kind.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable cause. Advisory only; not part of the contract.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::TeamExists`].
    pub fn team_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TeamExists, message)
    }

    /// Convenience constructor for [`ErrorCode::PrExists`].
    pub fn pr_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PrExists, message)
    }

    /// Convenience constructor for [`ErrorCode::PrMerged`].
    pub fn pr_merged(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PrMerged, message)
    }

    /// Convenience constructor for [`ErrorCode::NotAssigned`].
    pub fn not_assigned(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAssigned, message)
    }

    /// Convenience constructor for [`ErrorCode::NoCandidate`].
    pub fn no_candidate(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoCandidate, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorCode::TeamExists, "\"TEAM_EXISTS\"")]
    #[case(ErrorCode::PrExists, "\"PR_EXISTS\"")]
    #[case(ErrorCode::PrMerged, "\"PR_MERGED\"")]
    #[case(ErrorCode::NotAssigned, "\"NOT_ASSIGNED\"")]
    #[case(ErrorCode::NoCandidate, "\"NO_CANDIDATE\"")]
    #[case(ErrorCode::NotFound, "\"NOT_FOUND\"")]
    #[case(ErrorCode::Internal, "\"INTERNAL\"")]
    fn error_codes_serialize_to_stable_wire_kinds(#[case] code: ErrorCode, #[case] wire: &str) {
        let serialized = serde_json::to_string(&code).expect("serialize code");
        assert_eq!(serialized, wire);
    }

    #[test]
    fn display_shows_the_cause() {
        let err = Error::pr_merged("pull request already merged");
        assert_eq!(err.to_string(), "pull request already merged");
        assert_eq!(err.code(), ErrorCode::PrMerged);
    }
}
