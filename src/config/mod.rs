//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!
//! process environment (+ optional .env)
//!     → secrets.rs (API keys, owner/repo, username)
//!
//! both shared via Arc with every handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Secrets never go through the config file
//! - A missing secret is a per-request condition, not a startup failure

pub mod loader;
pub mod schema;
pub mod secrets;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CacheConfig, CachePolicy, ListenerConfig, LogFormat, ObservabilityConfig, ServiceConfig,
    TimeoutConfig, UpstreamConfig,
};
pub use secrets::Secrets;
