//! Payment processors backed by the HTTP payment gateway.
//!
//! In production, the gateway's answer is passed through untouched. In the test environment the stand-in gateway
//! ("fakepay") runs on the same machine as the server and answers with `localhost` urls, which are rewritten to the
//! host the customer used to reach us.
use beer_payment_engine::{PaymentProcessor, PaymentProcessorError, PaymentRequest};
use gateway_tools::{
    helpers::{host_of, replace_localhost},
    GatewayApi,
    GatewayApiError,
    GatewayConfig,
    TransactionRequest,
};
use log::*;

use crate::config::Environment;

#[derive(Clone)]
pub enum GatewayProcessor {
    Production(GatewayApi),
    Fakepay(GatewayApi),
}

impl GatewayProcessor {
    pub fn new(environment: Environment, config: GatewayConfig) -> Result<Self, GatewayApiError> {
        let api = GatewayApi::new(config)?;
        let processor = match environment {
            Environment::Production => Self::Production(api),
            Environment::Test => Self::Fakepay(api),
        };
        info!("💳️ Using the {} payment processor at {}", processor.name(), processor.api().config().url);
        Ok(processor)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Production(_) => "production",
            Self::Fakepay(_) => "fakepay",
        }
    }

    fn api(&self) -> &GatewayApi {
        match self {
            Self::Production(api) | Self::Fakepay(api) => api,
        }
    }
}

impl PaymentProcessor for GatewayProcessor {
    async fn initiate_transaction(&self, request: PaymentRequest) -> Result<String, PaymentProcessorError> {
        let transaction = TransactionRequest {
            amount: request.amount,
            webhook_url: request.webhook_url,
            webhook_key: request.webhook_secret,
            redirect_url: request.redirect_url,
        };
        let url = self.api().create_transaction(&transaction).await.map_err(to_processor_error)?;
        match self {
            Self::Production(_) => Ok(url),
            Self::Fakepay(_) => match host_of(&transaction.redirect_url) {
                Some(host) => {
                    let url = replace_localhost(&url, &host).map_err(to_processor_error)?;
                    trace!("💳️ Fakepay redirect rewritten to {url}");
                    Ok(url)
                },
                None => Ok(url),
            },
        }
    }
}

fn to_processor_error(e: GatewayApiError) -> PaymentProcessorError {
    match e {
        GatewayApiError::Timeout => PaymentProcessorError::Timeout,
        GatewayApiError::Initialization(_) | GatewayApiError::RestResponseError(_) => {
            PaymentProcessorError::Unavailable(e.to_string())
        },
        GatewayApiError::JsonError(_)
        | GatewayApiError::QueryError { .. }
        | GatewayApiError::MissingRedirect
        | GatewayApiError::InvalidUrl(_) => PaymentProcessorError::InvalidResponse(e.to_string()),
    }
}
