//! Bearer token middleware for Actix Web.
//!
//! The payment gateway calls the settlement webhook with `Authorization: Bearer <secret>`, where the secret is the one
//! we handed it when the transaction was created. Wrap the webhook route in this middleware to reject any call that
//! does not carry it.
//!
//! The check happens before the request reaches the handler, so a rejected call never touches the database. Requests
//! that pass are tagged with an [`AuthenticatedWebhook`] extension, which handlers take as proof that the check was
//! done.
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error,
    HttpMessage,
};
use beer_payment_engine::WebhookAuthenticator;
use futures::future::LocalBoxFuture;
use log::{trace, warn};

use crate::errors::ServerError;

/// Marker placed in the request extensions once the bearer token has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedWebhook(());

pub struct BearerAuthMiddlewareFactory {
    authenticator: WebhookAuthenticator,
}

impl BearerAuthMiddlewareFactory {
    pub fn new(authenticator: WebhookAuthenticator) -> Self {
        BearerAuthMiddlewareFactory { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<EitherBody<B>>;
    type Transform = BearerAuthMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddlewareService {
            authenticator: self.authenticator.clone(),
            service: Rc::new(service),
        }))
    }
}

pub struct BearerAuthMiddlewareService<S> {
    authenticator: WebhookAuthenticator,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<EitherBody<B>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        trace!("🔐️ Checking bearer token for {}", req.path());
        let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        if !self.authenticator.authenticate(header) {
            warn!("🔐️ Invalid or missing bearer token on {}. Denying access.", req.path());
            let res = req.error_response(ServerError::Unauthorized).map_into_right_body();
            return Box::pin(async { Ok(res) });
        }
        trace!("🔐️ Bearer token check for request ✅️");
        req.extensions_mut().insert(AuthenticatedWebhook(()));
        let service = Rc::clone(&self.service);
        Box::pin(async move { service.call(req).await.map(ServiceResponse::map_into_left_body) })
    }
}
