//! PunkScript Test Harness - Round-trip validation
//!
//! This crate provides:
//! - A scenario corpus (symbols, scripts, repeated runs, quotes, limits)
//! - The reference round-trip, which needs no script interpreter
//! - An external round-trip through `node`
//! - Document invariant checks

pub mod corpus;
pub mod harness;
pub mod node;

pub use corpus::*;
pub use harness::*;
pub use node::*;
