use std::{fmt::Display, str::FromStr};

use bpg_common::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Could not convert value. {0}")]
pub struct ConversionError(String);

//--------------------------------------          Card         ---------------------------------------------------------
/// A prepaid card. `server_id` is the number printed on the physical card; `id` is the store's own key.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub server_id: i64,
    /// The number of units (beers) credited to the card.
    pub balance: i64,
    pub last_credited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCard {
    pub server_id: i64,
}

impl NewCard {
    pub fn new(server_id: i64) -> Self {
        Self { server_id }
    }
}

/// A partial update of a card. Fields that are `None` are left untouched.
///
/// `credit` is applied as an increment in the store, never as an absolute value, so two credits that race each other
/// cannot overwrite one another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardUpdate {
    pub credit: Option<i64>,
    pub last_credited_at: Option<DateTime<Utc>>,
}

impl CardUpdate {
    pub fn credit(units: i64, at: DateTime<Utc>) -> Self {
        Self { credit: Some(units), last_credited_at: Some(at) }
    }

    pub fn is_empty(&self) -> bool {
        self.credit.is_none() && self.last_credited_at.is_none()
    }
}

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// The order has been created and the customer has been sent to the payment gateway.
    Pending,
    /// The gateway reported a successful payment. The card has been credited.
    Completed,
    /// The gateway reported that the payment did not go through.
    Failed,
}

impl OrderStatusType {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatusType::Pending)
    }

    /// Only a completed payment puts beers on the card.
    pub fn credits_card(&self) -> bool {
        matches!(self, OrderStatusType::Completed)
    }
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "Pending"),
            OrderStatusType::Completed => write!(f, "Completed"),
            OrderStatusType::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    /// Gateways are not consistent about capitalisation, so matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------        OrderId        ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl FromStr for OrderId {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self).map_err(|e| ConversionError(format!("Invalid order id '{s}'. {e}")))
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OrderId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

//--------------------------------------          Order        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub card_id: i64,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatusType,
    pub quantity: i64,
    pub total_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub card_id: i64,
    pub quantity: i64,
    pub total_amount: Money,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    pub fn new(card_id: i64, quantity: i64, total_amount: Money) -> Self {
        Self { card_id, quantity, total_amount, created_at: Utc::now() }
    }
}
