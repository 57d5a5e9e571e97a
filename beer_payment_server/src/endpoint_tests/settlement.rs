use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use beer_payment_engine::{
    db_types::{OrderId, OrderStatusType},
    traits::SettlementResult,
    SettlementApi,
    WebhookAuthenticator,
};
use bpg_common::Secret;
use mockall::predicate::eq;
use serde_json::json;

use super::{
    helpers::{card, order, request, WEBHOOK_SECRET},
    mocks::MockStore,
};
use crate::routes::SettleOrderRoute;

fn configure(store: MockStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let authenticator = WebhookAuthenticator::new(Secret::new(WEBHOOK_SECRET.to_string()));
        cfg.service(SettleOrderRoute::<MockStore>::new(authenticator))
            .app_data(web::Data::new(SettlementApi::new(store)));
    }
}

fn callback(order_id: &str, token: Option<&str>, status: &str) -> TestRequest {
    let mut req = TestRequest::post().uri(&format!("/order/{order_id}")).set_form([("Status", status)]);
    if let Some(token) = token {
        req = req.insert_header(("Authorization", token));
    }
    req
}

const BEARER: &str = "Bearer s3cr3t";

// A store with no expectations panics if it is touched at all
#[actix_web::test]
async fn bad_tokens_never_reach_the_store() {
    let _ = env_logger::try_init().ok();
    for token in [None, Some(""), Some("Bearer wrong"), Some("s3cr3t"), Some("Bearer s3cr3t2")] {
        let (status, body) = request(callback("7", token, "Completed"), configure(MockStore::new())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{token:?}");
        assert_eq!(body, "Unauthorized");
    }
}

#[actix_web::test]
async fn completed_callback_credits_the_card() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store
        .expect_fetch_order_by_id()
        .with(eq(OrderId(7)))
        .times(1)
        .returning(|_| Ok(Some(order(7, OrderStatusType::Pending, 3))));
    store
        .expect_settle_order()
        .withf(|id, status, credit| {
            *id == OrderId(7) && *status == OrderStatusType::Completed && credit.as_ref().map(|c| c.quantity) == Some(3)
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(SettlementResult::Settled { order: order(7, OrderStatusType::Completed, 3), card: Some(card(3, 8)) })
        });
    let (status, body) = request(callback("7", Some(BEARER), "Completed"), configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Order 7 is Completed");
}

#[actix_web::test]
async fn replayed_callback_is_a_no_op() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_order_by_id().returning(|_| Ok(Some(order(7, OrderStatusType::Completed, 3))));
    store.expect_settle_order().never();
    let (status, body) = request(callback("7", Some(BEARER), "Completed"), configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Order was already processed");
}

#[actix_web::test]
async fn lost_race_is_a_no_op() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_order_by_id().returning(|_| Ok(Some(order(7, OrderStatusType::Pending, 3))));
    store
        .expect_settle_order()
        .times(1)
        .returning(|_, _, _| Ok(SettlementResult::AlreadySettled(order(7, OrderStatusType::Completed, 3))));
    let (status, body) = request(callback("7", Some(BEARER), "Completed"), configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Order was already processed");
}

#[actix_web::test]
async fn failed_callback_as_json() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_order_by_id().returning(|_| Ok(Some(order(7, OrderStatusType::Pending, 3))));
    store
        .expect_settle_order()
        .withf(|_, status, credit| *status == OrderStatusType::Failed && credit.is_none())
        .times(1)
        .returning(|_, _, _| Ok(SettlementResult::Settled { order: order(7, OrderStatusType::Failed, 3), card: None }));
    let req = TestRequest::post()
        .uri("/order/7")
        .insert_header(("Authorization", BEARER))
        .set_json(json!({"status": "Failed"}));
    let (status, body) = request(req, configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Order 7 is Failed");
}

#[actix_web::test]
async fn unknown_order() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_order_by_id().with(eq(OrderId(99))).returning(|_| Ok(None));
    store.expect_settle_order().never();
    let (status, body) = request(callback("99", Some(BEARER), "Completed"), configure(store)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Order 99 not found");
}

#[actix_web::test]
async fn invalid_callbacks() {
    let _ = env_logger::try_init().ok();
    let (status, body) = request(callback("7", Some(BEARER), "Paid"), configure(MockStore::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Invalid status"), "{body}");

    let (status, body) = request(callback("7", Some(BEARER), "Pending"), configure(MockStore::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Pending is not a valid settlement status");

    let (status, body) = request(callback("65f1c0ffee", Some(BEARER), "Completed"), configure(MockStore::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Invalid order id"), "{body}");
}
