//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`; the access logger wraps the whole
//! router so unknown paths produce a log line too.

use axum::routing::get;
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// Handlers use `State<ApiContext>` (provided via `with_state`) and open
/// their own database connection per request.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route(
            "/patients/:id",
            get(endpoints::patients::get)
                .put(endpoints::patients::update)
                .delete(endpoints::patients::remove),
        )
        .route(
            "/patients/:id/appointments",
            get(endpoints::patients::appointments),
        )
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::create),
        )
        .route(
            "/appointments/:id",
            get(endpoints::appointments::get)
                .put(endpoints::appointments::update)
                .delete(endpoints::appointments::remove),
        )
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::access::log_access))
}
