//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! admin client, codec, CLI
//!     → tracing events with structured fields (method, path, status, id)
//!     → logging.rs subscriber (stderr, EnvFilter)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; the binary installs the subscriber
//! - `RUST_LOG` overrides the configured level

pub mod logging;
