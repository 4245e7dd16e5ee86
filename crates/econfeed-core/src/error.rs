use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Local validation failures detected before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("credential must be formatted as '<key>:<secret>'")]
    CredentialMissingSeparator,

    #[error("invalid output type '{value}', expected one of dict, df, raw")]
    InvalidOutputShape { value: String },

    #[error("incorrect date format '{value}', expected YYYY-MM-DD, YYYY-MM-DD HH:MM or YYYY-MM-DD HH:MM:SS")]
    InvalidDateFormat { value: String },
    #[error("start date '{start}' is after end date '{end}'")]
    StartAfterEnd { start: String, end: String },
    #[error("start date is required when end date is supplied")]
    EndWithoutStart,

    #[error("base url '{value}' is not a valid absolute http(s) url")]
    InvalidBaseUrl { value: String },
}

/// Error classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    CredentialFormat,
    Parameters,
    Date,
    Authentication,
    Transport,
}

impl ApiErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CredentialFormat => "credential_format",
            Self::Parameters => "parameters",
            Self::Date => "date",
            Self::Authentication => "authentication",
            Self::Transport => "transport",
        }
    }
}

impl Display for ApiErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const EMPTY_RESULT_MESSAGE: &str = "no data for the given parameters";

/// Structured error returned by every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    status: Option<u16>,
    empty_result: bool,
}

impl ApiError {
    fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            empty_result: false,
        }
    }

    pub fn credential_format(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::CredentialFormat, message)
    }

    pub fn parameters(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parameters, message)
    }

    pub fn date(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Date, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Authentication, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    /// A successful response that carried no data. Reported as a `Parameters` error.
    pub(crate) fn empty_result(status: u16) -> Self {
        Self {
            empty_result: true,
            ..Self::parameters(format!("{EMPTY_RESULT_MESSAGE} (status {status})"))
        }
        .with_status(status)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the response that produced this error, if any.
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Only transport failures are plausibly transient.
    pub const fn retryable(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Transport)
    }

    /// True for the successful-but-empty response case.
    pub const fn is_empty_result(&self) -> bool {
        self.empty_result
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::CredentialFormat => "api.credential_format",
            ApiErrorKind::Parameters => "api.parameters",
            ApiErrorKind::Date => "api.date",
            ApiErrorKind::Authentication => "api.authentication",
            ApiErrorKind::Transport => "api.transport",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        let message = value.to_string();
        match value {
            ValidationError::CredentialMissingSeparator => Self::credential_format(message),
            ValidationError::InvalidOutputShape { .. } | ValidationError::InvalidBaseUrl { .. } => {
                Self::parameters(message)
            }
            ValidationError::InvalidDateFormat { .. }
            | ValidationError::StartAfterEnd { .. }
            | ValidationError::EndWithoutStart => Self::date(message),
        }
    }
}
