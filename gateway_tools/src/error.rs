use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GatewayApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not reach the payment gateway: {0}")]
    RestResponseError(String),
    #[error("The payment gateway did not answer in time")]
    Timeout,
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Transaction request failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("The payment gateway response did not contain a redirect url")]
    MissingRedirect,
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
}
