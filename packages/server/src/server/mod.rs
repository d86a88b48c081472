// HTTP server setup (Axum)
pub mod app;
pub mod error;
pub mod request;
pub mod routes;

pub use app::*;
pub use error::{ApiError, Envelope};
