use super::transport::{HttpResponse, TransportError};
use contracts::shared::api::ApiErrorBody;
use contracts::shared::form::ValidationErrors;
use std::collections::BTreeMap;
use thiserror::Error;

/// Failure of a resource-client call or a mutation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Client-side rule violations; shown inline, never as a toast
    #[error("{0}")]
    Validation(ValidationErrors),

    /// The server rejected the request payload (4xx)
    #[error("{message}")]
    RequestValidation {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Referential-integrity rejection; the server message is kept verbatim
    #[error("{0}")]
    Conflict(String),

    #[error("Unable to reach the server: {0}")]
    Network(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    /// A submission of the same form is still in flight
    #[error("A previous submission is still in progress")]
    Busy,
}

impl ApiError {
    /// Map a non-2xx response to the most specific variant
    pub fn from_response(response: &HttpResponse) -> Self {
        let body = ApiErrorBody::parse(&response.body);
        let status = response.status;
        let message = body
            .best_message()
            .unwrap_or_else(|| default_message(status).to_string());

        match status {
            401 | 403 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            400..=499 => ApiError::RequestValidation {
                message,
                field_errors: body.field_errors(),
            },
            _ => ApiError::Server { status, message },
        }
    }

    /// A 2xx body that could not be decoded into the expected shape
    pub fn unexpected_body(status: u16, err: impl std::fmt::Display) -> Self {
        ApiError::Server {
            status,
            message: format!("Unexpected response from server: {}", err),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    /// Field-scoped messages, client- or server-side
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match self {
            ApiError::Validation(errors) => errors
                .iter()
                .map(|v| (v.field.clone(), v.message.clone()))
                .collect(),
            ApiError::RequestValidation { field_errors, .. } => field_errors.clone(),
            _ => BTreeMap::new(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) => ApiError::Network(msg),
            TransportError::Request(msg) => ApiError::Network(msg),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

fn default_message(status: u16) -> &'static str {
    match status {
        401 => "Your session has expired. Please sign in again.",
        403 => "You do not have permission to perform this action.",
        404 => "The requested record was not found.",
        409 => "The record is referenced by other data and cannot be changed.",
        400..=499 => "The request was rejected by the server.",
        _ => "Something went wrong on the server. Please try again.",
    }
}
