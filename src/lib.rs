//! Upstream proxy library behind matty.lol.

pub mod config;
pub mod error;
pub mod feed;
pub mod http;
pub mod integrations;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::{Secrets, ServiceConfig};
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
