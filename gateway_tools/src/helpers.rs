use url::Url;

use crate::GatewayApiError;

/// The stand-in gateway runs next to the server and hands out redirect urls pointing at `localhost`. A customer on
/// another device cannot follow those, so the host is swapped for the one the customer used to reach us.
///
/// Only the host is replaced. The scheme, port and path of the gateway url are kept. Urls that do not point at
/// `localhost` are returned unchanged.
pub fn replace_localhost(redirect: &str, public_host: &str) -> Result<String, GatewayApiError> {
    let mut url = Url::parse(redirect).map_err(|e| GatewayApiError::InvalidUrl(format!("{redirect}. {e}")))?;
    if url.host_str() != Some("localhost") {
        return Ok(redirect.to_string());
    }
    url.set_host(Some(public_host)).map_err(|e| GatewayApiError::InvalidUrl(format!("{public_host}. {e}")))?;
    Ok(url.to_string())
}

/// Extracts the bare host name (no port) from a url.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok().and_then(|u| u.host_str().map(String::from))
}
