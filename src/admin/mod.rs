//! Caddy admin API client subsystem.
//!
//! # Data Flow
//! ```text
//! caller (CLI, web admin)
//!     → client.rs (one HTTP call per operation, JSON bodies)
//!     → endpoints.rs (admin API paths)
//!     → remote Caddy admin API (applies and live-reloads each write)
//!     → error.rs (transport vs. remote failures)
//! ```
//!
//! # Design Decisions
//! - The remote server is the single source of truth; nothing is cached
//! - No retries: a timed-out create may already have been applied
//! - Connection parameters are an explicit immutable value, never global

pub mod client;
pub mod endpoints;
pub mod error;

pub use client::{next_id_after, AdminClient, FIRST_ROUTE_ID};
pub use error::{AdminError, AdminResult};
