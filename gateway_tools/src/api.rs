use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};

use crate::{GatewayApiError, GatewayConfig, TransactionRequest, TransactionResponse};

/// A thin client for the payment gateway's transaction endpoint.
///
/// Every call is a single attempt. Retrying is left to the customer, who can simply place a new order.
#[derive(Clone)]
pub struct GatewayApi {
    config: GatewayConfig,
    client: Arc<Client>,
}

impl GatewayApi {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        if !config.api_key.is_empty() {
            let bearer = format!("Bearer {}", config.api_key.reveal());
            let mut val = HeaderValue::from_str(&bearer).map_err(|e| GatewayApiError::Initialization(e.to_string()))?;
            val.set_sensitive(true);
            headers.insert(AUTHORIZATION, val);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Submits a transaction to the gateway and returns the url the customer must be redirected to.
    pub async fn create_transaction(&self, request: &TransactionRequest) -> Result<String, GatewayApiError> {
        let url = self.config.url.as_str();
        debug!("💳️ Requesting a {} transaction from {url}", request.amount);
        let response = self.client.post(url).json(request).send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayApiError::Timeout
            } else {
                GatewayApiError::RestResponseError(e.to_string())
            }
        })?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("💳️ Payment gateway rejected the transaction. {status}. {message}");
            return Err(GatewayApiError::QueryError { status: status.as_u16(), message });
        }
        trace!("💳️ Transaction request successful. {status}");
        let body = response.json::<TransactionResponse>().await.map_err(|e| GatewayApiError::JsonError(e.to_string()))?;
        let redirect = body.redirect_url().ok_or(GatewayApiError::MissingRedirect)?;
        info!("💳️ Payment gateway accepted a {} transaction", request.amount);
        Ok(redirect.to_string())
    }
}
