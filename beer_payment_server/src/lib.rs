//! # Beer payment server
//! This crate hosts the HTTP server for the beer payment gateway. It is responsible for:
//! * Accepting new orders from the kiosk and redirecting the customer to the payment gateway.
//! * Receiving the payment gateway's settlement callbacks and crediting cards.
//! * Showing customers their card balance.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `GET /health`: A health check route that returns a 200 OK response.
//! * `POST /order`: Creates a new order.
//! * `POST /order/{order_id}`: The payment gateway's settlement callback. Requires a bearer token.
//! * `GET /client/{server_id}`: The card summary.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
