//! Decoder macro
//!
//! The runtime half of the run codec, written once into the namespace:
//!
//! ```text
//! p=>p.split(',').map(p=>String.fromCharCode(parseInt(
//!     [...p].map(p=>CIPHER.indexOf(p).toString(31)).join(''),31))).join('')
//! ```
//!
//! Every name is replaced by its slot, `String` by `''.constructor` and the
//! radix by digit slots. The parameter reuses the result binding `_R`.

use punk_codec::{QuoteStrategist, RunCodec};
use punk_core::{PunkResult, SymbolKey};

use crate::namespace::{Name, Namespace, Stage, Value};

/// Key of the decoder entry
pub const DECODER_KEY: &str = ".";

/// Source of the decoder arrow function
pub fn decoder_source(
    ns: &Namespace,
    codec: &RunCodec,
    param: &str,
    quotes: &mut QuoteStrategist,
) -> PunkResult<String> {
    let slot = |name: &str, quotes: &mut QuoteStrategist| {
        ns.slot_of(&Name::Ident(name.to_string()), quotes)
    };

    let split = slot("split", quotes)?;
    let map = slot("map", quotes)?;
    let constructor = slot("constructor", quotes)?;
    let from_char_code = slot("fromCharCode", quotes)?;
    let parse_int = slot("parseInt", quotes)?;
    let index_of = slot("indexOf", quotes)?;
    let to_string = slot("toString", quotes)?;
    let join = slot("join", quotes)?;
    let radix = ns.number(codec.radix() as usize, quotes)?;

    let separator = quotes.quote(&codec.separator().to_string());
    let cipher = quotes.quote(&codec.cipher().as_string());
    let empty = quotes.quote("");
    let digits = format!(
        "[...{p}][{map}]({p}=>{cipher}[{index_of}]({p})[{to_string}]({radix}))[{join}]({empty})",
        p = param,
    );
    let string = format!("{}[{}]", quotes.quote(""), constructor);
    let unit = format!(
        "{p}=>{string}[{from_char_code}]({parse_int}({digits},{radix}))",
        p = param,
    );
    Ok(format!(
        "{p}=>{p}[{split}]({separator})[{map}]({unit})[{join}]({join_with})",
        p = param,
        join_with = quotes.quote(""),
    ))
}

/// Bind the decoder under [`DECODER_KEY`]
pub fn derive_decoder(
    ns: &mut Namespace,
    codec: &RunCodec,
    param: &str,
    quotes: &mut QuoteStrategist,
) -> PunkResult<()> {
    let source = decoder_source(ns, codec, param, quotes)?;
    ns.bind(
        Name::Decoder,
        SymbolKey::new(DECODER_KEY)?,
        source,
        Value::Function("decode".into()),
        Stage::Decoder,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Encoder;
    use crate::reflector::V8Reflector;
    use punk_core::EncoderConfig;

    #[test]
    fn test_decoder_entry() {
        let mut encoder = Encoder::new(EncoderConfig::default(), &V8Reflector).unwrap();
        encoder.build_axioms().unwrap();
        encoder.derive_letters().unwrap();
        encoder.derive_identifiers().unwrap();
        encoder.emit_codec().unwrap();

        let ns = encoder.namespace();
        let entry = ns.get(&Name::Decoder).unwrap();
        assert_eq!(entry.key.as_str(), DECODER_KEY);
        assert_eq!(entry.value, Value::Function("decode".into()));
        assert_eq!(entry.stage, Stage::Decoder);
        assert!(entry.is_committed());
        assert!(entry.expression.starts_with("_$=>_$[$['|']]"));
        assert!(entry.expression.is_ascii());
        assert!(!entry.expression.chars().any(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_decoder_needs_identifiers() {
        let mut encoder = Encoder::new(EncoderConfig::default(), &V8Reflector).unwrap();
        encoder.build_axioms().unwrap();
        encoder.derive_letters().unwrap();

        let mut quotes = QuoteStrategist::new(Default::default(), Some(0));
        let err = decoder_source(encoder.namespace(), &RunCodec::new(), "_$", &mut quotes);
        assert!(err.is_err());
    }
}
