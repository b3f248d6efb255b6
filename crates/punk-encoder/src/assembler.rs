//! Expression assembler
//!
//! Picks the cheapest representation of every run, in this order:
//! 1. a single letter or digit - its slot (or an uppercase call)
//! 2. a constant word - its axiom, stringified
//! 3. a constructor name - `<instance>.constructor.name`
//! 4. a catalog identifier - its slot
//! 5. a dictionary run - its slot
//! 6. a number - digit slots or a decoder call, whichever is shorter
//! 7. anything else - a decoder call
//!
//! Punctuation runs become quoted literals and space runs use the space
//! slot, repeated when longer than one.

use punk_codec::{escaped_len, RunCodec};
use punk_core::QuoteStyle;

use crate::axioms::Axiom;
use crate::decoder::DECODER_KEY;
use crate::dictionary::Dictionary;
use crate::expr::Expr;
use crate::identifiers;
use crate::letters::char_key;
use crate::namespace::{Name, Namespace};
use crate::reflector::Construct;
use crate::tokenizer::{Run, RunKind};

/// True if the namespace alone can express `run` (priorities 1 to 4).
///
/// Matching is on the text only: `true` inside `is_true_x` is a word run
/// but still resolves to its axiom.
pub fn is_resolvable(ns: &Namespace, run: &Run) -> bool {
    resolve_builtin(ns, run).is_some()
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn resolve_builtin(ns: &Namespace, run: &Run) -> Option<Expr> {
    let text = run.text.as_str();

    if let Some(c) = single_char(text).filter(char::is_ascii_alphanumeric) {
        if let Some(key) = ns.key_of(&Name::Char(c)) {
            return Some(Expr::Slot(key.clone()));
        }
        if c.is_ascii_uppercase()
            && ns.has(&Name::Char(c.to_ascii_lowercase()))
            && ns.has(&Name::Ident("toUpperCase".into()))
        {
            return Some(Expr::Uppercase(c));
        }
    }
    if let Some(axiom) = Axiom::from_word(text) {
        return Some(Expr::Constant(axiom));
    }
    if let Some(construct) = Construct::from_name(text) {
        return Some(Expr::ConstructorName(construct));
    }
    if identifiers::lookup(text).is_some() {
        let entry = ns.get(&Name::Ident(text.to_string()))?;
        if entry.value.as_text().is_some() {
            return Some(Expr::Slot(entry.key.clone()));
        }
    }
    None
}

/// Builds the body expression from runs
pub struct Assembler<'a> {
    ns: &'a Namespace,
    dictionary: &'a Dictionary,
    codec: &'a RunCodec,
}

impl<'a> Assembler<'a> {
    pub fn new(ns: &'a Namespace, dictionary: &'a Dictionary, codec: &'a RunCodec) -> Self {
        Assembler {
            ns,
            dictionary,
            codec,
        }
    }

    /// Concatenation of every run's representation
    pub fn assemble(&self, runs: &[Run]) -> Expr {
        Expr::Concat(runs.iter().map(|run| self.resolve(run)).collect())
    }

    /// Representation of a single run
    pub fn resolve(&self, run: &Run) -> Expr {
        match run.kind {
            RunKind::Space => {
                let count = run.utf16_len();
                return match self.ns.key_of(&Name::Char(' ')) {
                    Some(key) if count == 1 => Expr::Slot(key.clone()),
                    Some(_) => Expr::Repeat(count),
                    None => self.decode(&run.text),
                };
            }
            RunKind::Symbol => return Expr::Literal(run.text.clone()),
            _ => {}
        }

        if let Some(expr) = resolve_builtin(self.ns, run) {
            return expr;
        }
        if let Some(entry) = self.dictionary.get(&run.text) {
            return Expr::Slot(entry.key.clone());
        }
        if run.kind == RunKind::Number {
            if let Some(digits) = self.digits(&run.text) {
                if self.estimate_digits(&run.text) <= self.estimate_decode(&run.text) {
                    return digits;
                }
            }
        }
        self.decode(&run.text)
    }

    fn decode(&self, text: &str) -> Expr {
        Expr::Decode(self.codec.encode(text))
    }

    fn digits(&self, text: &str) -> Option<Expr> {
        text.chars()
            .map(|c| self.ns.key_of(&Name::Char(c)).cloned().map(Expr::Slot))
            .collect::<Option<Vec<_>>>()
            .map(Expr::Concat)
    }

    /// `R.___+R.__$+...`
    fn estimate_digits(&self, text: &str) -> usize {
        let root = self.ns.root().len();
        text.chars()
            .filter_map(|c| char_key(c).ok())
            .map(|key| root + 1 + key.len())
            .sum::<usize>()
            + text.len().saturating_sub(1)
    }

    /// `R['.']('<payload>')`
    fn estimate_decode(&self, text: &str) -> usize {
        let slot = self.ns.root().len() + DECODER_KEY.len() + 4;
        slot + 2 + escaped_len(&self.codec.encode(text), QuoteStyle::Single)
    }
}
