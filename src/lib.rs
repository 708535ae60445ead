//! Route administration for Caddy's admin API.
//!
//! Encodes reverse-proxy routes into Caddy's JSON config tree and manages them
//! remotely: list, fetch, create, update, delete, plus whole-config load and
//! server stop.

pub mod admin;
pub mod config;
pub mod observability;
pub mod route;

pub use admin::{AdminClient, AdminError, AdminResult};
pub use config::{AdminClientConfig, Settings};
pub use route::{ReverseRoute, RoutePatch};
