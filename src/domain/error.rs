use thiserror::Error;

/// HTTP-style status carried by domain errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpCode {
    BadRequest,
    Conflict,
    InternalServerError,
}

impl HttpCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Conflict => 409,
            Self::InternalServerError => 500,
        }
    }
}

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Rejected input or missing record; both surface as a bad request
    #[error("{message}")]
    BadRequest { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Status code the HTTP layer should answer with
    pub fn status(&self) -> HttpCode {
        match self {
            Self::BadRequest { .. } => HttpCode::BadRequest,
            Self::Conflict { .. } => HttpCode::Conflict,
            Self::Storage { .. } | Self::Configuration { .. } => {
                HttpCode::InternalServerError
            }
        }
    }

    /// Human-readable message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message }
            | Self::Conflict { message }
            | Self::Storage { message }
            | Self::Configuration { message } => message,
        }
    }
}
