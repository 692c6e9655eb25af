//! Domain-level error types.
//!
//! Every deck rule outcome is reported as an [`Error`] value rather than a
//! panic, so callers can branch on [`ErrorCode`] explicitly. Inbound adapters
//! map the codes to HTTP statuses or UI messages.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed input: quantity out of range or a blank required field.
    Validation,
    /// The caller does not own the deck.
    Authorization,
    /// The card, deck or entry does not exist.
    NotFound,
    /// The card was submitted to the wrong deck partition.
    Placement,
    /// A partition size bound would be exceeded.
    Size,
    /// The card's ceiling is zero under the active banlist.
    Forbidden,
    /// The card's aggregate quantity would exceed its ceiling.
    Limit,
    /// A printed catalog code could not be resolved to a card.
    Resolution,
    /// A collaborator (store, catalog) is unreachable.
    ServiceUnavailable,
    /// An unexpected failure inside the engine or an adapter.
    Internal,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use deck_engine::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::NotFound, "missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
}

/// Maximum number of alternative set codes attached to a resolution error.
pub const MAX_RESOLUTION_SUGGESTIONS: usize = 5;

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// # Panics
    ///
    /// Panics when `message` is blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Alternative set codes attached by [`Error::resolution`].
    ///
    /// # Examples
    /// ```
    /// use deck_engine::domain::Error;
    ///
    /// let err = Error::resolution("unknown set", vec!["LOB".to_owned()]);
    /// assert_eq!(err.suggestions(), vec!["LOB"]);
    /// ```
    pub fn suggestions(&self) -> Vec<&str> {
        self.details
            .as_ref()
            .and_then(|details| details.get("suggestions"))
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Convenience constructor for [`ErrorCode::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Convenience constructor for [`ErrorCode::Authorization`].
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Authorization, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Placement`].
    pub fn placement(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Placement, message)
    }

    /// Convenience constructor for [`ErrorCode::Size`].
    pub fn size(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Size, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::Limit`].
    pub fn limit(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Limit, message)
    }

    /// Build a [`ErrorCode::Resolution`] error carrying at most
    /// [`MAX_RESOLUTION_SUGGESTIONS`] alternative codes.
    pub fn resolution(message: impl Into<String>, suggestions: Vec<String>) -> Self {
        let error = Self::new(ErrorCode::Resolution, message);
        if suggestions.is_empty() {
            return error;
        }
        let suggestions: Vec<String> = suggestions
            .into_iter()
            .take(MAX_RESOLUTION_SUGGESTIONS)
            .collect();
        error.with_details(json!({ "suggestions": suggestions }))
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
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

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            details,
        } = value;

        let mut error = Error::try_new(code, message)?;
        error.details = details;
        Ok(error)
    }
}

#[cfg(test)]
mod tests;
