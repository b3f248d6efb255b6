//! Expression tree of the assembled body
//!
//! The body is kept as a tree so it can be rendered to target source and
//! also evaluated in Rust against the namespace values. Evaluation is the
//! reference check of the round-trip: it must reproduce the input exactly.

use punk_codec::{QuoteStrategist, RunCodec};
use punk_core::{PunkError, PunkResult, SymbolKey};

use crate::axioms::Axiom;
use crate::namespace::{Name, Namespace, Value};
use crate::reflector::Construct;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Quoted string literal
    Literal(String),
    /// Namespace property holding text
    Slot(SymbolKey),
    /// `` `${<axiom>}` ``
    Constant(Axiom),
    /// `<instance>.constructor.name`
    ConstructorName(Construct),
    /// `<lowercase slot>.toUpperCase()`
    Uppercase(char),
    /// `<space>.repeat(<count>)`
    Repeat(usize),
    /// `<decoder>('<payload>')`
    Decode(String),
    /// Terms joined with `+`
    Concat(Vec<Expr>),
}

impl Expr {
    /// Render as target source
    pub fn render(&self, ns: &Namespace, quotes: &mut QuoteStrategist) -> PunkResult<String> {
        Ok(match self {
            Expr::Literal(text) => quotes.quote(text),
            Expr::Slot(key) => ns.slot(key, quotes)?,
            Expr::Constant(axiom) => format!("`${{{}}}`", axiom.expression(quotes)),
            Expr::ConstructorName(construct) => format!(
                "{}[{}][{}]",
                construct.instance(quotes),
                ns.slot_of(&Name::Ident("constructor".into()), quotes)?,
                ns.slot_of(&Name::Ident("name".into()), quotes)?
            ),
            Expr::Uppercase(c) => ns.uppercase(*c, quotes)?,
            Expr::Repeat(count) => format!(
                "{}[{}]({})",
                ns.slot_of(&Name::Char(' '), quotes)?,
                ns.slot_of(&Name::Ident("repeat".into()), quotes)?,
                ns.number(*count, quotes)?
            ),
            Expr::Decode(payload) => format!(
                "{}({})",
                ns.slot_of(&Name::Decoder, quotes)?,
                quotes.quote(payload)
            ),
            Expr::Concat(terms) if terms.is_empty() => quotes.quote(""),
            Expr::Concat(terms) => {
                let rendered = terms
                    .iter()
                    .map(|term| term.render(ns, quotes))
                    .collect::<PunkResult<Vec<_>>>()?;
                rendered.join("+")
            }
        })
    }

    /// Value the rendered source produces at runtime
    pub fn evaluate(&self, ns: &Namespace, codec: &RunCodec) -> PunkResult<String> {
        match self {
            Expr::Literal(text) => Ok(text.clone()),
            Expr::Slot(key) => text_at(ns, key),
            Expr::Constant(axiom) => Ok(axiom.word().to_string()),
            Expr::ConstructorName(construct) => {
                require(ns, &Name::Ident("constructor".into()))?;
                require(ns, &Name::Ident("name".into()))?;
                Ok(construct.name().to_string())
            }
            Expr::Uppercase(c) => {
                let lower = require(ns, &Name::Char(c.to_ascii_lowercase()))?;
                require(ns, &Name::Ident("toUpperCase".into()))?;
                Ok(text_at(ns, &lower)?.to_uppercase())
            }
            Expr::Repeat(count) => {
                let space = require(ns, &Name::Char(' '))?;
                require(ns, &Name::Ident("repeat".into()))?;
                Ok(text_at(ns, &space)?.repeat(*count))
            }
            Expr::Decode(payload) => {
                require(ns, &Name::Decoder)?;
                codec.decode(payload)
            }
            Expr::Concat(terms) => terms.iter().map(|term| term.evaluate(ns, codec)).collect(),
        }
    }

    /// Top-level terms
    pub fn terms(&self) -> &[Expr] {
        match self {
            Expr::Concat(terms) => terms,
            other => std::slice::from_ref(other),
        }
    }
}

fn require(ns: &Namespace, name: &Name) -> PunkResult<SymbolKey> {
    match ns.get(name) {
        Some(entry) if entry.is_committed() => Ok(entry.key.clone()),
        _ => Err(PunkError::Evaluation(format!("{} is not available", name))),
    }
}

fn text_at(ns: &Namespace, key: &SymbolKey) -> PunkResult<String> {
    match ns.value(key)? {
        Value::Text(text) => Ok(text.clone()),
        Value::Function(name) => Err(PunkError::Evaluation(format!(
            "slot {} holds the function {}",
            key, name
        ))),
    }
}
