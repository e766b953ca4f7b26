//! HTTP error envelope and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns: [`crate::domain::Error`]
//! carries a stable kind, and this adapter turns it into a status code and
//! the `{"error": {"code", "message"}}` body. Internal failure detail is
//! logged here and never leaks to clients.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error carried through Actix and rendered as the response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

/// Body of an error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// The error payload.
    pub error: ErrorItem,
}

/// Kind and cause of a failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorItem {
    /// Stable machine-readable kind; clients branch on this, never on the
    /// message.
    #[schema(example = "NOT_FOUND")]
    pub code: ErrorCode,
    /// Human-readable cause.
    #[schema(example = "pull request not found")]
    pub message: String,
}

impl ApiError {
    /// Kind carried by this error.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message rendered into the envelope.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// The INTERNAL envelope returned when a request overruns its deadline.
    pub fn timeout() -> Self {
        Self {
            code: ErrorCode::Internal,
            message: "request timeout".to_owned(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    fn to_status_code(&self) -> StatusCode {
        match self.code {
            // A name collision on creation is a malformed request, per the
            // external contract.
            ErrorCode::TeamExists => StatusCode::BAD_REQUEST,
            ErrorCode::PrExists
            | ErrorCode::PrMerged
            | ErrorCode::NotAssigned
            | ErrorCode::NoCandidate => StatusCode::CONFLICT,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let message = if err.code() == ErrorCode::Internal {
            // Log the detail, hand the client a stable generic cause.
            error!(cause = %err.message(), "internal error surfaced to client");
            "internal error".to_owned()
        } else {
            err.message().to_owned()
        };

        Self {
            code: err.code(),
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        builder.json(ErrorBody {
            error: ErrorItem {
                code: self.code,
                message: self.message.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(Error::team_exists("team already exists"), StatusCode::BAD_REQUEST)]
    #[case(Error::pr_exists("pull request already exists"), StatusCode::CONFLICT)]
    #[case(Error::pr_merged("pull request already merged"), StatusCode::CONFLICT)]
    #[case(Error::not_assigned("reviewer not assigned"), StatusCode::CONFLICT)]
    #[case(Error::no_candidate("no replacement candidate"), StatusCode::CONFLICT)]
    #[case(Error::not_found("not found"), StatusCode::NOT_FOUND)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn every_kind_maps_to_its_contract_status(#[case] domain: Error, #[case] expected: StatusCode) {
        let api = ApiError::from(domain);
        assert_eq!(api.status_code(), expected);
    }

    #[test]
    fn envelope_carries_code_and_message() {
        let api = ApiError::from(Error::no_candidate("no replacement candidate"));
        let body = ErrorBody {
            error: ErrorItem {
                code: api.code(),
                message: api.message().to_owned(),
            },
        };

        let value = serde_json::to_value(&body).expect("serialize envelope");
        assert_eq!(
            value.pointer("/error/code").and_then(Value::as_str),
            Some("NO_CANDIDATE")
        );
        assert_eq!(
            value.pointer("/error/message").and_then(Value::as_str),
            Some("no replacement candidate")
        );
    }

    #[test]
    fn internal_detail_is_redacted_from_the_client_message() {
        let api = ApiError::from(Error::internal("pool exhausted on shard 3"));
        assert_eq!(api.message(), "internal error");
    }

    #[test]
    fn timeout_keeps_its_specific_message() {
        let api = ApiError::timeout();
        assert_eq!(api.code(), ErrorCode::Internal);
        assert_eq!(api.message(), "request timeout");
    }
}
