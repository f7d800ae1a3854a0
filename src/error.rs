use std::fmt;

use miette::Diagnostic;
use oauth2::{HttpClientError, RequestTokenError, basic::BasicErrorResponse};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_error::SpanTrace;

/// A single problem descriptor from the `errors` array of a failed response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct ApiError {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

impl ApiError {
    #[must_use]
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.detail)
    }
}

/// The `{"errors": [...]}` body returned on non-success responses.
///
/// Renders as `title: detail` pairs joined by `"; "`. An empty list renders as
/// an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Error type of a failed token endpoint exchange.
pub type AuthError = RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>;

/// Errors that can occur when interacting with the Parasut API.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("error making request: {0}")]
    #[diagnostic(
        code(parasut_rs::request_error),
        help("Check your network connection and Parasut API availability")
    )]
    Request(#[source] reqwest::Error),

    #[error("error encoding request body: {0}")]
    #[diagnostic(
        code(parasut_rs::serialization_error),
        help("The request body could not be encoded as JSON")
    )]
    Serialization(#[source] serde_json::Error),

    #[error("error decoding response: {0}")]
    #[diagnostic(
        code(parasut_rs::deserialization_error),
        help("The API returned data in an unexpected format")
    )]
    DeserializationError(#[source] serde_json::Error, Option<String>),

    #[error("endpoint could not be parsed as a URL: {0}")]
    #[diagnostic(
        code(parasut_rs::invalid_endpoint),
        help("Check the configured base, authorize, token and redirect URLs")
    )]
    InvalidEndpoint(String),

    /// A non-success response carrying the `{"errors": [...]}` envelope.
    #[error("api error ({status}): {response}")]
    #[diagnostic(
        code(parasut_rs::api_error),
        help("Review the errors returned by the Parasut API")
    )]
    Api {
        status: StatusCode,
        url: String,
        response: ErrorResponse,
        span_trace: SpanTrace,
    },

    /// The token endpoint rejected the exchange or could not be reached.
    #[error("authentication failed: {0}")]
    #[diagnostic(
        code(parasut_rs::auth_error),
        help("Verify the client id, client secret, redirect URL and user credentials")
    )]
    Auth(#[source] AuthError),

    #[error("no refresh token available")]
    #[diagnostic(
        code(parasut_rs::missing_refresh_token),
        help("Authenticate again; the current token was issued without a refresh token")
    )]
    MissingRefreshToken,

    #[error("pdf payload is not valid base64: {0}")]
    #[diagnostic(
        code(parasut_rs::invalid_pdf_payload),
        help("The document endpoint returned an unexpected payload")
    )]
    InvalidPdfPayload(#[source] base64::DecodeError),
}

impl Error {
    /// Build an [`Error::Api`] from a failed response body. Bodies that are not an
    /// error envelope yield an empty error list.
    pub(crate) fn api(status: StatusCode, url: String, body: &str) -> Self {
        let response = serde_json::from_str(body).unwrap_or_default();
        Self::Api {
            status,
            url,
            response,
            span_trace: SpanTrace::capture(),
        }
    }

    /// The HTTP status of an API error, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The span trace captured when an API error was created.
    #[must_use]
    pub fn span_trace(&self) -> Option<&SpanTrace> {
        match self {
            Self::Api { span_trace, .. } => Some(span_trace),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl From<AuthError> for Error {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

/// Type alias for results from this crate.
pub type Result<O> = std::result::Result<O, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_multiple_errors() {
        let response = ErrorResponse {
            errors: vec![
                ApiError::new("Validation Error", "Name is required"),
                ApiError::new("Authorization Error", "Invalid token"),
            ],
        };
        assert_eq!(
            response.to_string(),
            "Validation Error: Name is required; Authorization Error: Invalid token"
        );
    }

    #[test]
    fn single_error_has_no_separator() {
        let response = ErrorResponse {
            errors: vec![ApiError::new("Not Found", "Record not found")],
        };
        assert_eq!(response.to_string(), "Not Found: Record not found");
    }

    #[test]
    fn empty_error_list_renders_empty() {
        assert_eq!(ErrorResponse::default().to_string(), "");
    }

    #[test]
    fn api_error_falls_back_to_empty_envelope() {
        let error = Error::api(
            StatusCode::BAD_GATEWAY,
            "https://api.parasut.com/v4/1/accounts".to_string(),
            "<html>bad gateway</html>",
        );
        match error {
            Error::Api {
                status, response, ..
            } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert!(response.errors.is_empty());
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn api_error_decodes_envelope() {
        let body = r#"{"errors":[{"title":"Validation Error","detail":"Name is required"}]}"#;
        let error = Error::api(StatusCode::UNPROCESSABLE_ENTITY, String::new(), body);
        assert_eq!(error.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert_eq!(
            error.to_string(),
            "api error (422 Unprocessable Entity): Validation Error: Name is required"
        );
    }
}
