//! Route handlers for the beer payment server.
//!
//! | Route | Caller | Handler |
//! |---|---|---|
//! | `GET /health` | monitoring | [`health`] |
//! | `POST /order` | the kiosk | [`create_order`] |
//! | `POST /order/{order_id}` | the payment gateway, with a bearer token | [`settle_order`] |
//! | `GET /client/{server_id}` | the customer, after paying | [`card_summary`] |
//!
//! Handlers are generic over the store and processor traits so that the endpoint tests can run them against mocks.
//! Actix cannot register generic handlers directly, so each one gets a `...Route` service factory from the `route!`
//! macro. Handlers only parse the request and map the result. The work happens in the engine APIs held in `web::Data`.
use actix_web::{get, web, Either, HttpRequest, HttpResponse, Responder};
use beer_payment_engine::{
    db_types::{OrderId, OrderStatusType},
    order_objects::{CallbackUrls, SettlementOutcome},
    traits::{CardManagement, PaymentProcessor, SettlementDatabase},
    CardApi,
    OrderFlowApi,
    SettlementApi,
};
use log::*;

use crate::{
    config::ServerOptions,
    data_objects::{CardSummary, NewOrderRequest, OrderCreatedResponse, SettlementForm},
    errors::ServerError,
    helpers::callback_base_url,
    middleware::AuthenticatedWebhook,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where authenticated)  => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(beer_payment_engine::WebhookAuthenticator, core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            pub fn new(authenticator: beer_payment_engine::WebhookAuthenticator) -> Self {
                Self(authenticator, core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds)++ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::BearerAuthMiddlewareFactory::new(self.0));
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/order" impl SettlementDatabase, PaymentProcessor);
/// Route handler for new orders
///
/// The kiosk posts `{"quantity": n, "id": card_number}`. Both fields may be numbers or numeric strings.
///
/// A `Pending` order is stored and the payment gateway is asked for a payment page. The response is
/// `201 {"url": "<payment page>"}`, and the kiosk sends the customer to that url.
pub async fn create_order<B, P>(
    req: HttpRequest,
    body: web::Json<NewOrderRequest>,
    api: web::Data<OrderFlowApi<B, P>>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError>
where
    B: SettlementDatabase,
    P: PaymentProcessor,
{
    let body = body.into_inner();
    let card_id = body.id.to_i64("server ID")?;
    let quantity = body.quantity.to_i64("quantity")?;
    debug!("💻️ New order request for {quantity} units on card #{card_id}");
    let callbacks = CallbackUrls::new(callback_base_url(&req, &options));
    let created = api.create_order(card_id, quantity, options.unit_price, &callbacks).await?;
    Ok(HttpResponse::Created().json(OrderCreatedResponse { url: created.redirect_url }))
}

route!(settle_order => Post "/order/{order_id}" impl SettlementDatabase where authenticated);
/// Route handler for the payment gateway's settlement callback
///
/// The route is wrapped in the bearer token middleware, so unauthenticated calls never reach this handler.
/// The [`AuthenticatedWebhook`] extractor is the proof of that.
///
/// Repeated callbacks for the same order succeed without changing anything.
pub async fn settle_order<B: SettlementDatabase>(
    _auth: web::ReqData<AuthenticatedWebhook>,
    path: web::Path<String>,
    body: Either<web::Form<SettlementForm>, web::Json<SettlementForm>>,
    api: web::Data<SettlementApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path
        .into_inner()
        .parse::<OrderId>()
        .map_err(|e| ServerError::InvalidRequestPath(format!("Invalid order id. {e}")))?;
    let form = match body {
        Either::Left(form) => form.into_inner(),
        Either::Right(json) => json.into_inner(),
    };
    let status = form
        .status
        .parse::<OrderStatusType>()
        .map_err(|e| ServerError::InvalidRequestBody(format!("Invalid status. {e}")))?;
    debug!("💻️ Settlement callback for order {order_id}: {status}");
    let message = match api.settle(&order_id, status).await? {
        SettlementOutcome::Settled { order, .. } => format!("Order {} is {}", order.id, order.status),
        SettlementOutcome::AlreadySettled { .. } => "Order was already processed".to_string(),
    };
    Ok(HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(message))
}

//----------------------------------------------   Cards  ----------------------------------------------------
route!(card_summary => Get "/client/{server_id}" impl CardManagement);
/// The customer lands here after paying. Returns the card balance and the current price.
pub async fn card_summary<B: CardManagement>(
    path: web::Path<String>,
    api: web::Data<CardApi<B>>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let server_id = path
        .into_inner()
        .trim()
        .parse::<i64>()
        .map_err(|e| ServerError::InvalidRequestPath(format!("Invalid server ID: {e}")))?;
    trace!("💻️ GET card summary for #{server_id}");
    let card = api.fetch_card(server_id).await?;
    Ok(HttpResponse::Ok().json(CardSummary::new(card, options.unit_price, &options.name)))
}
