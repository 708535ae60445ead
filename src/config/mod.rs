//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → AdminClientConfig handed to AdminClient::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the client never reads ambient state
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{check, load_config, read_config, ConfigError};
pub use schema::{AdminClientConfig, ObservabilityConfig, Settings};
pub use validation::{validate_config, ValidationError};
