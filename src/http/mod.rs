//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, method and query checks)
//!     → handlers.rs (config check, upstream call)
//!     → response.rs (envelope, Cache-Control, failure translation)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::Integration;
pub use server::{AppState, HttpServer};
