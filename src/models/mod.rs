//! Models Module - Data Structures & Configuration
//!
//! Single source of truth for addresses, list names, resolution and
//! classification records, the error taxonomy and runtime configuration.

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
