use axum::http::StatusCode;
use thiserror::Error;

/// Rejections raised while turning typed-in values into a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("total word count {total} cannot be less than previous total {previous}")]
    BelowPrevious { total: u64, previous: u64 },
    #[error("invalid date {0:?}, expected yyyy-mm-dd")]
    Date(String),
    #[error("invalid word count {0:?}")]
    WordCount(String),
}

#[derive(Debug, Error)]
pub enum TrackerError {
    /// Recoverable; the ledger is left untouched.
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    /// The store could not be reached or refused the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl InputError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BelowPrevious { .. } => "below_previous",
            Self::Date(_) => "invalid_date",
            Self::WordCount(_) => "invalid_total",
        }
    }
}

impl TrackerError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }

    /// Short identifier used in redirect query strings.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(input) => input.code(),
            Self::Unavailable(_) => "unavailable",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::InvalidInput(input) => Self::bad_request(input.to_string()),
            TrackerError::Unavailable(reason) => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: format!("store unavailable: {reason}"),
            },
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
