//! PunkScript Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every stage of the encoder:
//! - Errors (PunkError, PunkResult)
//! - Symbol alphabets and bijective numerals
//! - Symbol keys and the key generator
//! - Identifier rules and encoder configuration

pub mod alphabet;
pub mod bijective;
pub mod config;
pub mod error;
pub mod ident;
pub mod key;

pub use alphabet::*;
pub use bijective::*;
pub use config::*;
pub use error::*;
pub use key::*;
