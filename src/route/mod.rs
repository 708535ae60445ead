//! Reverse-proxy route model and its Caddy JSON representation.
//!
//! # Data Flow
//! ```text
//! ReverseRoute (id, host, path, upstream)
//!     → codec::encode (fixed skeleton + four pointer writes)
//!     → serde_json::Value sent to the admin API
//!
//! admin API response text
//!     → codec::decode / decode_list (tolerant pointer reads)
//!     → ReverseRoute snapshots
//! ```
//!
//! # Design Decisions
//! - One fixed route shape: one host, one path, one upstream, always terminal
//! - Decoding never fails; absent fields become empty strings or zero

pub mod codec;
pub mod types;

pub use codec::{decode, decode_list, decode_str, encode, encode_string, EncodeError};
pub use types::{ReverseRoute, RoutePatch};
