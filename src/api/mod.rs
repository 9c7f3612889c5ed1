//! REST API module
//!
//! The mock government-services API:
//! - Routing and the five service handlers
//! - Trace ID and security header middleware
//! - Request/response models shared with the session client

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use middleware::{trace_id_middleware, TraceId, TRACE_ID_HEADER};
pub use routes::build_api_routes;
pub use server::ApiServer;
