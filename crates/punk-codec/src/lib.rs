//! PunkScript Codec - Literal-level encodings
//!
//! This crate implements the encodings applied to individual strings:
//! - String literal escaping for the three quote styles
//! - The Quoting Strategist (only / cycle / random / smart policies)
//! - The Codepoint/Run Codec (UTF-16 units as base-31 symbol numerals)

pub mod escape;
pub mod quote;
pub mod run;

pub use escape::*;
pub use quote::*;
pub use run::*;
