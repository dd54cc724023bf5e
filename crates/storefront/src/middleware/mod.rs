//! HTTP middleware for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP context)
//! 2. CORS
//! 3. `TraceLayer` (request span with a `request_id` field)
//! 4. Request ID (reuse or generate, echo in response)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
