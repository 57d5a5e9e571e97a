mod bearer;

pub use bearer::{AuthenticatedWebhook, BearerAuthMiddlewareFactory, BearerAuthMiddlewareService};
