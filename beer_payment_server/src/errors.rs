use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use beer_payment_engine::OrderFlowError;
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("{0}")]
    InvalidRequestBody(String),
    #[error("{0}")]
    InvalidRequestPath(String),
    #[error("{0}")]
    NoRecordFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Could not create a transaction. {0}")]
    UpstreamError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error bodies are plain text. Internal details are logged, not sent to the client.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            error!("💥️ {self}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).insert_header(ContentType::plaintext()).body(body)
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::InvalidArgument(s) => Self::InvalidRequestBody(s),
            OrderFlowError::NotFound(s) => Self::NoRecordFound(s),
            OrderFlowError::Unauthorized => Self::Unauthorized,
            OrderFlowError::UpstreamError(s) => Self::UpstreamError(s),
            OrderFlowError::InternalError(s) => Self::BackendError(s),
        }
    }
}
