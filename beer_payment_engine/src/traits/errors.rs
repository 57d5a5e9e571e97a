use thiserror::Error;

use crate::db_types::OrderId;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Card with id {0} does not exist")]
    CardNotFound(i64),
    #[error("Order {0} does not exist")]
    OrderNotFound(OrderId),
    #[error("The record conflicts with an existing one. {0}")]
    Conflict(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(ref de) if de.is_unique_violation() => StoreError::Conflict(de.message().to_string()),
            _ => StoreError::DatabaseError(e.to_string()),
        }
    }
}
