//! HTTP API: handlers, middleware, DTOs and the router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
mod doc;

pub use doc::ApiDoc;
pub use routes::create_router;
