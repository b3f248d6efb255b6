//! The symbol namespace
//!
//! Every derived value lives in one property of the root object. Entries
//! are added in stages; a stage is rendered as a single statement
//!
//! ```text
//! R={...R,<key>:<expression>,...}
//! ```
//!
//! and only then committed. Slots of uncommitted entries cannot be
//! rendered, so an expression can never refer to its own stage or to a
//! later one.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use punk_codec::QuoteStrategist;
use punk_core::{PunkError, PunkResult, SymbolKey};

/// Logical name of a namespace entry
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Name {
    /// A letter, digit or the space
    Char(char),
    /// An identifier from the catalog
    Ident(String),
    /// A dictionary run
    Run(String),
    /// The run decoder
    Decoder,
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::Char(c) => write!(f, "char {:?}", c),
            Name::Ident(name) => write!(f, "identifier {}", name),
            Name::Run(text) => write!(f, "run {:?}", text),
            Name::Decoder => f.write_str("decoder"),
        }
    }
}

/// Runtime value of an entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Text(String),
    /// A callable; only its name is recorded
    Function(String),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Function(_) => None,
        }
    }
}

/// Generation stage, one statement each
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Seed,
    Structural,
    ConstructorLetters,
    Reflective,
    Globals,
    Conversions,
    LateLetters,
    LateIdentifiers,
    Decoder,
    Dictionary,
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub name: Name,
    pub key: SymbolKey,
    pub expression: String,
    pub value: Value,
    pub stage: Stage,
    committed: bool,
}

impl Entry {
    #[inline]
    pub fn is_committed(&self) -> bool {
        self.committed
    }
}

/// Ordered name/key/expression mapping of one document
#[derive(Clone, Debug)]
pub struct Namespace {
    root: String,
    entries: Vec<Entry>,
    by_key: HashMap<SymbolKey, usize>,
    by_name: HashMap<Name, usize>,
}

impl Namespace {
    /// Empty namespace rooted at the variable `root`
    pub fn new(root: impl Into<String>) -> Self {
        Namespace {
            root: root.into(),
            entries: Vec::new(),
            by_key: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Add a pending entry
    pub fn bind(
        &mut self,
        name: Name,
        key: SymbolKey,
        expression: String,
        value: Value,
        stage: Stage,
    ) -> PunkResult<()> {
        if let Some(&i) = self.by_key.get(&key) {
            return Err(PunkError::NamespaceCollision {
                key: key.to_string(),
                existing: self.entries[i].name.to_string(),
                incoming: name.to_string(),
            });
        }
        if let Some(&i) = self.by_name.get(&name) {
            return Err(PunkError::NamespaceCollision {
                key: key.to_string(),
                existing: format!("{} at {}", name, self.entries[i].key),
                incoming: name.to_string(),
            });
        }

        trace!(%name, %key, ?stage, "bind");
        let index = self.entries.len();
        self.by_key.insert(key.clone(), index);
        self.by_name.insert(name.clone(), index);
        self.entries.push(Entry {
            name,
            key,
            expression,
            value,
            stage,
            committed: false,
        });
        Ok(())
    }

    /// Render pending entries as one statement and commit them.
    ///
    /// The first statement creates the object, later ones spread it.
    /// Returns `None` when nothing is pending.
    pub fn flush(&mut self, quotes: &mut QuoteStrategist) -> Option<String> {
        let first = !self.entries.iter().any(|e| e.committed);
        let pending: Vec<usize> = (0..self.entries.len())
            .filter(|&i| !self.entries[i].committed)
            .collect();
        if pending.is_empty() {
            return None;
        }

        let mut fields = Vec::with_capacity(pending.len() + 1);
        if !first {
            fields.push(format!("...{}", self.root));
        }
        for &i in &pending {
            let entry = &self.entries[i];
            fields.push(format!(
                "{}:{}",
                quotes.quote_key(entry.key.as_str()),
                entry.expression
            ));
        }
        for &i in &pending {
            self.entries[i].committed = true;
        }

        Some(format!("{}={{{}}}", self.root, fields.join(",")))
    }

    /// Property access for a committed key (`R.key` or `R['key']`)
    pub fn slot(&self, key: &SymbolKey, quotes: &mut QuoteStrategist) -> PunkResult<String> {
        match self.by_key.get(key) {
            Some(&i) if self.entries[i].committed => {}
            _ => return Err(PunkError::UnresolvedReference(key.to_string())),
        }

        if key.is_identifier() {
            Ok(format!("{}.{}", self.root, key))
        } else {
            Ok(format!("{}[{}]", self.root, quotes.quote(key.as_str())))
        }
    }

    /// Slot of a named entry
    pub fn slot_of(&self, name: &Name, quotes: &mut QuoteStrategist) -> PunkResult<String> {
        let key = self.key_of(name).ok_or_else(|| match name {
            Name::Char(c) => PunkError::MissingDerivation(*c),
            other => PunkError::UnresolvedReference(other.to_string()),
        })?;
        self.slot(key, quotes)
    }

    /// Spell `word` as a concatenation of single-character slots.
    ///
    /// Uppercase letters without their own entry fall back to
    /// `<lowercase>.toUpperCase()` once that identifier exists.
    pub fn spell(&self, word: &str, quotes: &mut QuoteStrategist) -> PunkResult<String> {
        if word.is_empty() {
            return Ok(quotes.quote(""));
        }

        let mut terms = Vec::with_capacity(word.len());
        for c in word.chars() {
            let term = if self.has(&Name::Char(c)) {
                self.slot_of(&Name::Char(c), quotes)?
            } else {
                self.uppercase(c, quotes)?
            };
            terms.push(term);
        }
        Ok(terms.join("+"))
    }

    /// `<lowercase>.toUpperCase()` for an underived uppercase letter
    pub fn uppercase(&self, c: char, quotes: &mut QuoteStrategist) -> PunkResult<String> {
        let lower = Name::Char(c.to_ascii_lowercase());
        let to_upper = Name::Ident("toUpperCase".into());
        if !c.is_ascii_uppercase() || !self.is_committed(&lower) || !self.is_committed(&to_upper) {
            return Err(PunkError::MissingDerivation(c));
        }
        Ok(format!(
            "{}[{}]()",
            self.slot_of(&lower, quotes)?,
            self.slot_of(&to_upper, quotes)?
        ))
    }

    /// Spell a non-negative number with digit slots (a string at runtime)
    pub fn number(&self, n: usize, quotes: &mut QuoteStrategist) -> PunkResult<String> {
        self.spell(&n.to_string(), quotes)
    }

    #[inline]
    pub fn has(&self, name: &Name) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn is_committed(&self, name: &Name) -> bool {
        self.get(name).is_some_and(|e| e.committed)
    }

    pub fn get(&self, name: &Name) -> Option<&Entry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn key_of(&self, name: &Name) -> Option<&SymbolKey> {
        self.get(name).map(|e| &e.key)
    }

    pub fn by_key(&self, key: &SymbolKey) -> Option<&Entry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    /// Runtime value held at `key`
    pub fn value(&self, key: &SymbolKey) -> PunkResult<&Value> {
        match self.by_key(key) {
            Some(entry) if entry.committed => Ok(&entry.value),
            _ => Err(PunkError::UnresolvedReference(key.to_string())),
        }
    }

    pub fn contains_key(&self, key: &SymbolKey) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &SymbolKey> {
        self.entries.iter().map(|e| &e.key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
