//! Upstream access subsystem.
//!
//! # Data Flow
//! ```text
//! integration (jupiter / github / reddit)
//!     → endpoint.rs (URL + auth/identity headers)
//!     → client.rs (one GET, no retry)
//!     → UpstreamResult::{Success, Failure} | TransportError
//! ```
//!
//! # Design Decisions
//! - A non-2xx status is data, not an error
//! - Only transport faults cross the boundary as `Err`

pub mod client;
pub mod endpoint;

pub use client::{TransportError, UpstreamFetcher, UpstreamResult};
pub use endpoint::{join_path, Endpoint};
