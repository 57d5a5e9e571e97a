use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use beer_payment_engine::{
    db_types::OrderStatusType,
    traits::{PaymentProcessorError, StoreError},
    OrderFlowApi,
};
use bpg_common::{Money, Secret};
use mockall::predicate::eq;
use serde_json::json;

use super::{
    helpers::{card, order, request, test_options, WEBHOOK_SECRET},
    mocks::{MockProcessor, MockStore},
};
use crate::routes::CreateOrderRoute;

fn configure(store: MockStore, processor: MockProcessor) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let api = OrderFlowApi::new(store, processor, Secret::new(WEBHOOK_SECRET.to_string()));
        cfg.service(CreateOrderRoute::<MockStore, MockProcessor>::new())
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(test_options()));
    }
}

fn new_order(body: serde_json::Value) -> TestRequest {
    TestRequest::post().uri("/order").insert_header(("Host", "bar.local:8360")).set_json(body)
}

#[actix_web::test]
async fn create_order() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_card_by_server_id().with(eq(3)).times(1).returning(|_| Ok(Some(card(3, 5))));
    store
        .expect_insert_order()
        .withf(|o| o.card_id == 30 && o.quantity == 3 && o.total_amount == Money::from_cents(750))
        .times(1)
        .returning(|_| Ok(order(7, OrderStatusType::Pending, 3)));
    let mut processor = MockProcessor::new();
    processor
        .expect_initiate_transaction()
        .withf(|r| {
            r.amount == Money::from_cents(750)
                && r.webhook_url == "http://bar.local:8360/order/7"
                && r.redirect_url == "http://bar.local:8360/client/3"
                && r.webhook_secret.reveal() == WEBHOOK_SECRET
        })
        .times(1)
        .returning(|_| Ok("http://bar.local:8080/pay/7".to_string()));

    let (status, body) = request(new_order(json!({"quantity": "3", "id": "3"})), configure(store, processor)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, r#"{"url":"http://bar.local:8080/pay/7"}"#);
}

#[actix_web::test]
async fn numeric_fields_may_be_numbers() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_card_by_server_id().with(eq(3)).returning(|_| Ok(Some(card(3, 0))));
    store.expect_insert_order().returning(|_| Ok(order(8, OrderStatusType::Pending, 2)));
    let mut processor = MockProcessor::new();
    processor.expect_initiate_transaction().returning(|_| Ok("http://bar.local:8080/pay/8".to_string()));
    let (status, _) = request(new_order(json!({"quantity": 2, "id": 3})), configure(store, processor)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[actix_web::test]
async fn unknown_card() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_card_by_server_id().with(eq(42)).times(1).returning(|_| Ok(None));
    store.expect_insert_order().never();
    let (status, body) =
        request(new_order(json!({"quantity": "1", "id": "42"})), configure(store, MockProcessor::new())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Card 42 not found");
}

#[actix_web::test]
async fn quantity_must_be_positive() {
    let _ = env_logger::try_init().ok();
    for quantity in ["0", "-1"] {
        let (status, body) = request(
            new_order(json!({"quantity": quantity, "id": "3"})),
            configure(MockStore::new(), MockProcessor::new()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, format!("Quantity must be positive. Got {quantity}"));
    }
}

#[actix_web::test]
async fn invalid_fields() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        request(new_order(json!({"quantity": "2", "id": "abc"})), configure(MockStore::new(), MockProcessor::new()))
            .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Invalid server ID"), "{body}");

    let (status, body) =
        request(new_order(json!({"quantity": "lots", "id": "3"})), configure(MockStore::new(), MockProcessor::new()))
            .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Invalid quantity"), "{body}");

    let (status, body) =
        request(new_order(json!({"quantity": "2"})), configure(MockStore::new(), MockProcessor::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Failed to decode JSON data"), "{body}");
}

#[actix_web::test]
async fn gateway_failure() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_card_by_server_id().returning(|_| Ok(Some(card(3, 0))));
    store.expect_insert_order().times(1).returning(|_| Ok(order(9, OrderStatusType::Pending, 1)));
    let mut processor = MockProcessor::new();
    processor
        .expect_initiate_transaction()
        .times(1)
        .returning(|_| Err(PaymentProcessorError::Unavailable("connection refused".to_string())));
    let (status, body) = request(new_order(json!({"quantity": "1", "id": "3"})), configure(store, processor)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.starts_with("Could not create a transaction"), "{body}");
}

#[actix_web::test]
async fn store_failure() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_card_by_server_id().returning(|_| Ok(Some(card(3, 0))));
    store.expect_insert_order().returning(|_| Err(StoreError::DatabaseError("database is locked".to_string())));
    let (status, body) =
        request(new_order(json!({"quantity": "1", "id": "3"})), configure(store, MockProcessor::new())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal server error");
}
