//! Core Module - Business Logic
//!
//! List maintenance, authority resolution and classification.

pub mod address_list;
pub mod classifier;
pub mod resolver;

pub use address_list::*;
pub use classifier::*;
pub use resolver::*;
