use thiserror::Error;

use crate::store::{coded_message, StoreError};

/// Every way a single invocation can fail before it responds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The request body is not parseable JSON, or not a JSON object.
    #[error("malformed request body: {0}")]
    MalformedInput(String),

    /// Required fields were absent or null, listed in declaration order.
    #[error("missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<String> },

    /// The store rejected the operation with its own code and message.
    #[error("{}", coded_message(code, message))]
    Store { code: String, message: String },

    #[error("{0}")]
    Unexpected(String),
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedInput(_) | Self::Validation { .. } => 400,
            Self::Store { .. } | Self::Unexpected(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<StoreError> for HandlerError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Service { code, message } => Self::Store { code, message },
            StoreError::Unexpected(message) => Self::Unexpected(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_validation_failures_are_client_errors() {
        assert_eq!(HandlerError::MalformedInput("eof".to_string()).status_code(), 400);
        let validation = HandlerError::Validation {
            missing: vec!["email".to_string()],
        };
        assert_eq!(validation.status_code(), 400);
        assert!(validation.is_client_error());
    }

    #[test]
    fn store_service_errors_keep_code_and_message() {
        let error = HandlerError::from(StoreError::Service {
            code: "AccessDeniedException".to_string(),
            message: "not allowed".to_string(),
        });

        assert_eq!(error.status_code(), 500);
        assert_eq!(error.to_string(), "AccessDeniedException: not allowed");
    }

    #[test]
    fn store_errors_without_message_drop_the_separator() {
        let error = HandlerError::from(StoreError::service("InternalServerError", ""));
        assert_eq!(error.to_string(), "InternalServerError");
    }

    #[test]
    fn store_unexpected_errors_stay_unexpected() {
        let error = HandlerError::from(StoreError::Unexpected("timed out".to_string()));
        assert_eq!(error, HandlerError::Unexpected("timed out".to_string()));
    }
}
