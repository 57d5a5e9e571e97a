//! Types shared by every crate in the beer payment gateway workspace.
//!
//! * [`Money`] is a fixed-point amount in cents. Order totals are expressed in `Money`.
//! * [`UnitPrice`] is a fixed-point price per unit with sub-cent precision. Multiplying it by a quantity yields a
//!   [`Money`] total, rounded to the cent.
//! * [`Secret`] hides sensitive configuration values from logs.
mod money;

pub mod helpers;
mod secret;

pub use money::{Money, MoneyError, UnitPrice};
pub use secret::Secret;
