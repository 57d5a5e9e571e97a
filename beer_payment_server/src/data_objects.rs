use beer_payment_engine::db_types::Card;
use bpg_common::UnitPrice;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

/// Kiosks send numbers as strings, newer clients send them as numbers. Both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    pub fn to_i64(&self, field: &str) -> Result<i64, ServerError> {
        match self {
            IntOrString::Int(v) => Ok(*v),
            IntOrString::Str(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| ServerError::InvalidRequestBody(format!("Invalid {field}: {e}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub quantity: IntOrString,
    /// The number printed on the customer's card.
    pub id: IntOrString,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedResponse {
    pub url: String,
}

/// The body of the gateway's settlement callback. The gateway posts a form with a `Status` field; JSON bodies with a
/// `status` field are accepted too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementForm {
    #[serde(rename = "Status", alias = "status")]
    pub status: String,
}

/// What the customer sees when they land back on the server after paying.
#[derive(Debug, Clone, Serialize)]
pub struct CardSummary {
    pub server_id: i64,
    pub balance: i64,
    pub unit_price: UnitPrice,
    pub name: String,
    pub last_credited_at: Option<DateTime<Utc>>,
}

impl CardSummary {
    pub fn new(card: Card, unit_price: UnitPrice, name: &str) -> Self {
        Self {
            server_id: card.server_id,
            balance: card.balance,
            unit_price,
            name: name.to_string(),
            last_credited_at: card.last_credited_at,
        }
    }
}
