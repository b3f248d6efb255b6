//! Identifier/method deriver
//!
//! Identifiers are spelled once from single-character slots and stored
//! under a one-symbol key, so later references cost a single property
//! access. The catalog is split into groups that must be emitted in order:
//! each group only uses letters and identifiers of the groups before it.

use tracing::trace;

use punk_codec::QuoteStrategist;
use punk_core::{PunkResult, SymbolKey};

use crate::namespace::{Name, Namespace, Stage, Value};

/// Catalog entry: identifier and its fixed key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Identifier {
    pub name: &'static str,
    pub key: &'static str,
}

const fn ident(name: &'static str, key: &'static str) -> Identifier {
    Identifier { name, key }
}

/// Needed to reach constructors and build functions
pub const STRUCTURAL: &[Identifier] = &[
    ident("constructor", "$"),
    ident("return", "_"),
    ident("call", "!"),
    ident("concat", "+"),
    ident("join", "%"),
    ident("slice", "/"),
    ident("source", ","),
];

/// Spelled with constructor letters
pub const REFLECTIVE: &[Identifier] = &[
    ident("name", "?"),
    ident("map", "^"),
    ident("replace", ":"),
    ident("repeat", "*"),
    ident("split", "|"),
    ident("indexOf", "#"),
];

/// Global functions, fetched through `Function('return <name>')()`
pub const GLOBALS: &[Identifier] = &[
    ident("eval", "="),
    ident("escape", ">"),
    ident("unescape", "<"),
    ident("parseInt", "~"),
];

/// `"to"` + `String.name`
pub const TO_STRING: Identifier = ident("toString", "'");

/// Spelled once every letter exists
pub const LATE: &[Identifier] = &[
    ident("toUpperCase", "\""),
    ident("fromCharCode", "@"),
    ident("keys", "&"),
];

/// Every catalog entry, in emission order
pub fn catalog() -> impl Iterator<Item = &'static Identifier> {
    STRUCTURAL
        .iter()
        .chain(REFLECTIVE)
        .chain(GLOBALS)
        .chain(std::iter::once(&TO_STRING))
        .chain(LATE)
}

/// Catalog entry named `name`
pub fn lookup(name: &str) -> Option<&'static Identifier> {
    catalog().find(|i| i.name == name)
}

fn bind_ident(
    ns: &mut Namespace,
    identifier: &Identifier,
    expression: String,
    value: Value,
    stage: Stage,
) -> PunkResult<()> {
    trace!(identifier = identifier.name, key = identifier.key, "derived");
    ns.bind(
        Name::Ident(identifier.name.to_string()),
        SymbolKey::new(identifier.key)?,
        expression,
        value,
        stage,
    )
}

/// Spell `identifier` as a concatenation of letter slots and bind it
/// under its catalog key. Returns the spelled expression.
pub fn derive_identifier(
    ns: &mut Namespace,
    identifier: &Identifier,
    stage: Stage,
    quotes: &mut QuoteStrategist,
) -> PunkResult<String> {
    let expression = ns.spell(identifier.name, quotes)?;
    bind_ident(
        ns,
        identifier,
        expression.clone(),
        Value::Text(identifier.name.to_string()),
        stage,
    )?;
    Ok(expression)
}

/// Spell each identifier of `group`
pub fn derive_identifiers(
    ns: &mut Namespace,
    group: &[Identifier],
    stage: Stage,
    quotes: &mut QuoteStrategist,
) -> PunkResult<usize> {
    for identifier in group {
        derive_identifier(ns, identifier, stage, quotes)?;
    }
    Ok(group.len())
}

/// Fetch each global function of [`GLOBALS`]:
/// `(()=>{}).constructor('return '+<name>)()`
pub fn derive_globals(ns: &mut Namespace, quotes: &mut QuoteStrategist) -> PunkResult<usize> {
    for identifier in GLOBALS {
        let expression = format!(
            "(()=>{{}})[{}]({}+{}+{})()",
            ns.slot_of(&Name::Ident("constructor".into()), quotes)?,
            ns.slot_of(&Name::Ident("return".into()), quotes)?,
            ns.slot_of(&Name::Char(' '), quotes)?,
            ns.spell(identifier.name, quotes)?
        );
        bind_ident(
            ns,
            identifier,
            expression,
            Value::Function(identifier.name.to_string()),
            Stage::Globals,
        )?;
    }
    Ok(GLOBALS.len())
}

/// `toString` from `"to"` and the name of the String constructor
pub fn derive_to_string(ns: &mut Namespace, quotes: &mut QuoteStrategist) -> PunkResult<()> {
    let expression = format!(
        "{}+{}[{}][{}]",
        ns.spell("to", quotes)?,
        quotes.quote(""),
        ns.slot_of(&Name::Ident("constructor".into()), quotes)?,
        ns.slot_of(&Name::Ident("name".into()), quotes)?
    );
    bind_ident(
        ns,
        &TO_STRING,
        expression,
        Value::Text(TO_STRING.name.to_string()),
        Stage::Conversions,
    )
}
