use std::time::Duration;

use actix_web::{
    dev::Server,
    error::{JsonPayloadError, UrlencodedError},
    http::KeepAlive,
    middleware::{DefaultHeaders, Logger},
    web,
    App,
    HttpRequest,
    HttpServer,
};
use beer_payment_engine::{CardApi, OrderFlowApi, SettlementApi, SqliteDatabase, WebhookAuthenticator};
use log::*;

use crate::{
    config::{ServerConfig, ServerOptions},
    errors::ServerError,
    integrations::gateway::GatewayProcessor,
    routes::{health, CardSummaryRoute, CreateOrderRoute, SettleOrderRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let admin = CardApi::new(db.clone())
        .ensure_admin_card()
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    debug!("🚀️ Admin card #{} holds {} units", admin.server_id, admin.balance);
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(ServerError::from)
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let processor = GatewayProcessor::new(config.environment, config.gateway.clone())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let authenticator = WebhookAuthenticator::new(config.webhook_secret.clone());
    let options = ServerOptions::from_config(&config);
    let timeout = config.gateway.timeout;
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), processor.clone(), config.webhook_secret.clone())
            .with_timeout(timeout);
        let settlement_api = SettlementApi::new(db.clone());
        let cards_api = CardApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("bpg::access_log"))
            .wrap(security_headers())
            .app_data(json_config())
            .app_data(form_config())
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(settlement_api))
            .app_data(web::Data::new(cards_api))
            .app_data(web::Data::new(options.clone()))
            .service(health)
            .service(CreateOrderRoute::<SqliteDatabase, GatewayProcessor>::new())
            .service(SettleOrderRoute::<SqliteDatabase>::new(authenticator.clone()))
            .service(CardSummaryRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Strict-Transport-Security", "max-age=63072000; includeSubDomains"))
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("Referrer-Policy", "no-referrer"))
}

/// Malformed bodies are rejected with a plain-text 400, like every other client error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        debug!("💻️ Rejecting JSON body. {err}");
        ServerError::InvalidRequestBody(format!("Failed to decode JSON data. {err}")).into()
    })
}

pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err: UrlencodedError, _req: &HttpRequest| {
        debug!("💻️ Rejecting form body. {err}");
        ServerError::InvalidRequestBody(format!("Error parsing form data. {err}")).into()
    })
}
