use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use beer_payment_engine::CardApi;
use mockall::predicate::eq;

use super::{
    helpers::{card, request, send, test_options},
    mocks::MockStore,
};
use crate::routes::{health, CardSummaryRoute};

fn configure(store: MockStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.service(health)
            .service(CardSummaryRoute::<MockStore>::new())
            .app_data(web::Data::new(CardApi::new(store)))
            .app_data(web::Data::new(test_options()));
    }
}

#[actix_web::test]
async fn card_summary() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_card_by_server_id().with(eq(3)).times(1).returning(|_| Ok(Some(card(3, 8))));
    let (status, body) = request(TestRequest::get().uri("/client/3"), configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"server_id":3,"balance":8,"unit_price":2.5,"name":"Test Bar","last_credited_at":"2024-05-01T20:00:00Z"}"#
    );
}

#[actix_web::test]
async fn unknown_card_summary() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_card_by_server_id().returning(|_| Ok(None));
    let (status, body) = request(TestRequest::get().uri("/client/42"), configure(store)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Card 42 not found");

    let (status, _) = request(TestRequest::get().uri("/client/beer"), configure(MockStore::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn health_check_and_security_headers() {
    let _ = env_logger::try_init().ok();
    let res = send(TestRequest::get().uri("/health"), configure(MockStore::new())).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers.get("X-Frame-Options").unwrap(), "DENY");
    assert_eq!(res.headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(res.headers.get("Referrer-Policy").unwrap(), "no-referrer");
    assert!(res.headers.contains_key("Strict-Transport-Security"));
}
