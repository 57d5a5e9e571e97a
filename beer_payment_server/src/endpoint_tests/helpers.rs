use actix_web::{
    http::{header::HeaderMap, StatusCode},
    test,
    test::TestRequest,
    web::ServiceConfig,
    App,
};
use beer_payment_engine::db_types::{Card, Order, OrderId, OrderStatusType};
use bpg_common::Money;
use chrono::{TimeZone, Utc};
use log::debug;

use crate::{
    config::ServerOptions,
    server::{form_config, json_config, security_headers},
};

pub const WEBHOOK_SECRET: &str = "s3cr3t";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Runs a single request through an app built the same way as the real server, with the routes and data supplied by
/// `configure`.
pub async fn send<F>(req: TestRequest, configure: F) -> TestResponse
where F: FnOnce(&mut ServiceConfig) {
    let app = App::new().wrap(security_headers()).app_data(json_config()).app_data(form_config()).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let headers = res.headers().clone();
    let body = test::read_body(res).await;
    TestResponse { status, headers, body: String::from_utf8_lossy(&body).into_owned() }
}

pub async fn request<F>(req: TestRequest, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let res = send(req, configure).await;
    (res.status, res.body)
}

pub fn test_options() -> ServerOptions {
    ServerOptions {
        unit_price: "2.50".parse().unwrap(),
        public_url: None,
        use_x_forwarded_host: false,
        name: "Test Bar".to_string(),
    }
}

pub fn card(server_id: i64, balance: i64) -> Card {
    Card {
        id: server_id * 10,
        server_id,
        balance,
        last_credited_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap()),
        created_at: Utc.with_ymd_and_hms(2024, 4, 1, 18, 30, 0).unwrap(),
    }
}

pub fn order(id: i64, status: OrderStatusType, quantity: i64) -> Order {
    Order {
        id: OrderId(id),
        card_id: 30,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 19, 55, 0).unwrap(),
        status,
        quantity,
        total_amount: Money::from_cents(250 * quantity),
    }
}
