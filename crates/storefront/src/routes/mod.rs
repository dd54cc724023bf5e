//! HTTP route handlers for storefront.
//!
//! Every request stands in for one shopper interaction. Handlers are thin:
//! they parse input, call a service and shape the JSON response.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Apply filter (?search=&category=&price=&sort=), page 1
//! POST /products/load-more     - Reveal the next page
//! GET  /products/{id}          - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart contents
//! GET  /cart/count             - Header badge count
//! GET  /cart/analytics         - Aggregate cart figures
//! POST /cart/add               - Add a product {product_id, quantity?}
//! POST /cart/update            - Set quantity {product_id, quantity}
//! POST /cart/remove            - Remove a line {product_id}
//! POST /cart/clear             - Empty the cart
//! POST /cart/checkout          - Place the order
//!
//! # Session
//! GET  /session                - Current session
//! POST /session/login          - Sign in {email, password}
//! POST /session/register       - Register {name, email, password}
//! POST /session/logout         - Sign out
//! GET  /session/preferences    - Display preferences
//! PUT  /session/preferences    - Save display preferences
//! ```

pub mod cart;
pub mod products;
pub mod session;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/load-more", post(products::load_more))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/analytics", get(cart::analytics))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
}

/// Create the session routes router.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(session::show))
        .route("/login", post(session::login))
        .route("/register", post(session::register))
        .route("/logout", post(session::logout))
        .route(
            "/preferences",
            get(session::preferences).put(session::save_preferences),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/session", session_routes())
}

/// The complete application: routes, request tracing and CORS, bound to
/// `state`. Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    routes()
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(cors)
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
