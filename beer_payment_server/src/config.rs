use std::{env, fmt::Display, str::FromStr};

use bpg_common::{helpers::parse_boolean_flag, Secret, UnitPrice};
use gateway_tools::GatewayConfig;
use log::*;
use url::Url;

use crate::errors::ServerError;

const DEFAULT_BPG_HOST: &str = "127.0.0.1";
const DEFAULT_BPG_PORT: u16 = 8360;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/beer_store.db";
const DEFAULT_VENDOR_NAME: &str = "Beer Payment Gateway";

//-------------------------------------------------  Environment  ------------------------------------------------------
/// Selects which payment processor is used. Anything other than `production` runs against the stand-in gateway.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    Production,
    #[default]
    Test,
}

impl FromStr for Environment {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "test" | "development" | "dev" => Ok(Self::Test),
            _ => Err(ServerError::ConfigurationError(format!("Unknown environment: {s}"))),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Test => write!(f, "test"),
        }
    }
}

//-------------------------------------------------  ServerConfig  -----------------------------------------------------
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The price of a single beer.
    pub unit_price: UnitPrice,
    /// The gateway must present this as a bearer token when it calls the settlement webhook.
    pub webhook_secret: Secret<String>,
    pub environment: Environment,
    pub gateway: GatewayConfig,
    /// If set, callback urls handed to the gateway are built from this url rather than from the incoming request.
    pub public_url: Option<String>,
    /// If true, the X-Forwarded-Host and X-Forwarded-Proto headers are trusted when building callback urls.
    pub use_x_forwarded_host: bool,
    /// The vendor name shown to customers.
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BPG_HOST.to_string(),
            port: DEFAULT_BPG_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            unit_price: UnitPrice::default(),
            webhook_secret: Secret::default(),
            environment: Environment::default(),
            gateway: GatewayConfig::default(),
            public_url: None,
            use_x_forwarded_host: false,
            name: DEFAULT_VENDOR_NAME.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("BPG_HOST").ok().unwrap_or_else(|| DEFAULT_BPG_HOST.into());
        let port = env::var("BPG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for BPG_PORT. {e} Using the default, {DEFAULT_BPG_PORT}, instead."
                    );
                    DEFAULT_BPG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_BPG_PORT);
        let database_url = env::var("BPG_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ BPG_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let unit_price = configure_unit_price(env::var("BPG_UNIT_PRICE").ok());
        let webhook_secret = Secret::new(env::var("BPG_WEBHOOK_SECRET").ok().unwrap_or_else(|| {
            error!(
                "🪛️ BPG_WEBHOOK_SECRET is not set. Payment confirmations will be rejected until you set it to the \
                 secret shared with the payment gateway."
            );
            String::default()
        }));
        let environment = env::var("BPG_ENVIRONMENT")
            .ok()
            .and_then(|s| s.parse::<Environment>().map_err(|e| warn!("🪛️ {e}. Using the test environment.")).ok())
            .unwrap_or_default();
        if environment == Environment::Test {
            warn!("🚨️ Running in the test environment. Payments go to the stand-in gateway.");
        }
        let gateway = GatewayConfig::new_from_env_or_default();
        let public_url = configure_public_url(env::var("BPG_PUBLIC_URL").ok());
        let use_x_forwarded_host = parse_boolean_flag(env::var("BPG_USE_X_FORWARDED_HOST").ok(), false);
        let name = env::var("BPG_NAME").ok().unwrap_or_else(|| DEFAULT_VENDOR_NAME.to_string());
        Self {
            host,
            port,
            database_url,
            unit_price,
            webhook_secret,
            environment,
            gateway,
            public_url,
            use_x_forwarded_host,
            name,
        }
    }
}

fn configure_unit_price(value: Option<String>) -> UnitPrice {
    match value.map(|s| s.parse::<UnitPrice>()) {
        Some(Ok(price)) => {
            info!("🪛️ Beers are priced at {price} each");
            price
        },
        Some(Err(e)) => {
            error!("🪛️ Invalid configuration value for BPG_UNIT_PRICE. {e}. Beers will be free!");
            UnitPrice::default()
        },
        None => {
            error!("🪛️ BPG_UNIT_PRICE is not set. Beers will be free!");
            UnitPrice::default()
        },
    }
}

fn configure_public_url(value: Option<String>) -> Option<String> {
    let value = value.filter(|s| !s.trim().is_empty())?;
    match Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            info!("🪛️ Callback urls will be built from {url}");
            Some(value.trim().trim_end_matches('/').to_string())
        },
        Ok(url) => {
            warn!("🪛️ BPG_PUBLIC_URL must be an http(s) url, not {}. Ignoring it.", url.scheme());
            None
        },
        Err(e) => {
            warn!("🪛️ Invalid configuration value for BPG_PUBLIC_URL. {e}. Ignoring it.");
            None
        },
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// A subset of the server configuration that is used to configure the server's behaviour. Generally we try to keep this
/// as small as possible, and exclude secrets to avoid passing sensitive information around the system.
#[derive(Clone, Debug)]
pub struct ServerOptions {
    pub unit_price: UnitPrice,
    pub public_url: Option<String>,
    pub use_x_forwarded_host: bool,
    pub name: String,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            unit_price: config.unit_price,
            public_url: config.public_url.clone(),
            use_x_forwarded_host: config.use_x_forwarded_host,
            name: config.name.clone(),
        }
    }
}
