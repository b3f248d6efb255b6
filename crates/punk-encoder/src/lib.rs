//! PunkScript Encoder - Symbol-only document generation
//!
//! A document is generated in stages, each one only using what earlier
//! stages derived:
//! - Axioms: letters of `true`, `false`, `undefined`, `Infinity`, `NaN`
//!   and `[object Object]`
//! - Letters and digits: the seed, constructor names, escapes, base 36
//! - Identifiers: method names and global functions spelled from letters
//! - Decoder: the runtime half of the run codec
//! - Dictionary: frequent runs of the input under generated keys
//! - Body: one concatenation that rebuilds the input
//!
//! The entry point is [`generate_document`].

pub mod assembler;
pub mod axioms;
pub mod decoder;
pub mod dictionary;
pub mod document;
pub mod expr;
pub mod identifiers;
pub mod letters;
pub mod namespace;
pub mod reflector;
pub mod stats;
pub mod tokenizer;

pub use assembler::{is_resolvable, Assembler};
pub use axioms::{Axiom, AxiomTable};
pub use dictionary::{Dictionary, DictionaryEntry};
pub use document::*;
pub use expr::Expr;
pub use namespace::{Name, Namespace, Stage, Value};
pub use reflector::{Construct, RuntimeReflector, V8Reflector};
pub use stats::EncodingStats;
pub use tokenizer::{tokenize, Run, RunKind, Tokenizer};
