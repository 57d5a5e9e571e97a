use actix_web::{http::header::HOST, HttpRequest};
use log::trace;

use crate::config::ServerOptions;

/// Works out the public base url of this server, for building the callback urls handed to the payment gateway.
///
/// Sources, in decreasing order of preference:
/// 1. The configured public url (`BPG_PUBLIC_URL`).
/// 2. The `Forwarded` / `X-Forwarded-Host` / `X-Forwarded-Proto` headers, only if `use_x_forwarded_host` is set.
/// 3. The `Host` header of the request, with the scheme of the connection.
pub fn callback_base_url(req: &HttpRequest, options: &ServerOptions) -> String {
    if let Some(url) = &options.public_url {
        return url.clone();
    }
    if options.use_x_forwarded_host {
        let info = req.connection_info();
        trace!("Using proxy headers for the callback base url: {}://{}", info.scheme(), info.host());
        return format!("{}://{}", info.scheme(), info.host());
    }
    let scheme = if req.app_config().secure() { "https" } else { "http" };
    let host = req
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| req.app_config().host().to_string());
    format!("{scheme}://{host}")
}
