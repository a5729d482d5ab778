//! Utils Module - Helper Functions & Shared Utilities
//!
//! Constants, base-58 keys with PDA derivation, and account layout decoding.

pub mod constants;
pub mod decoder;
pub mod pubkey;

pub use constants::*;
pub use decoder::*;
pub use pubkey::*;
