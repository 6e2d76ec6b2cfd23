use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("invalid date `{input}`: {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("invalid interval: {reason}")]
    InvalidInterval { reason: String },

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl TimelineError {
    pub(crate) fn invalid_viewport(reason: impl Into<String>) -> Self {
        Self::InvalidViewport {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_interval(reason: impl Into<String>) -> Self {
        Self::InvalidInterval {
            reason: reason.into(),
        }
    }
}
