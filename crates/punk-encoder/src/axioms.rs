//! Axiom table
//!
//! Six language-level truths whose string forms are known in advance:
//!
//! | Axiom | Expression | String form |
//! |---|---|---|
//! | true | `!''` | `true` |
//! | false | `![]` | `false` |
//! | undefined | `[][[]]` | `undefined` |
//! | Infinity | `!''/![]` | `Infinity` |
//! | NaN | `+{}` | `NaN` |
//! | object | `{}` | `[object Object]` |
//!
//! Scanning the forms in that order yields the first letters of the
//! document, each at the first index where it occurs.

use std::fmt;

use punk_codec::QuoteStrategist;

/// Highest index the seed statement can reach (the digit counter runs 0..=9)
pub const MAX_AXIOM_INDEX: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axiom {
    True,
    False,
    Undefined,
    Infinity,
    NaN,
    ObjectString,
}

impl Axiom {
    /// Scan order
    pub const ALL: [Axiom; 6] = [
        Axiom::True,
        Axiom::False,
        Axiom::Undefined,
        Axiom::Infinity,
        Axiom::NaN,
        Axiom::ObjectString,
    ];

    /// String form of the axiom value
    pub fn word(self) -> &'static str {
        match self {
            Axiom::True => "true",
            Axiom::False => "false",
            Axiom::Undefined => "undefined",
            Axiom::Infinity => "Infinity",
            Axiom::NaN => "NaN",
            Axiom::ObjectString => "[object Object]",
        }
    }

    /// Symbol-only expression producing the axiom value
    pub fn expression(self, quotes: &mut QuoteStrategist) -> String {
        match self {
            Axiom::True => format!("!{}", quotes.quote("")),
            Axiom::False => "![]".to_string(),
            Axiom::Undefined => "[][[]]".to_string(),
            Axiom::Infinity => format!("!{}/![]", quotes.quote("")),
            Axiom::NaN => "+{}".to_string(),
            Axiom::ObjectString => "{}".to_string(),
        }
    }

    /// Axiom whose string form is exactly `word`
    pub fn from_word(word: &str) -> Option<Self> {
        Axiom::ALL.iter().copied().find(|a| a.word() == word)
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// One character recovered from an axiom
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxiomEntry {
    pub axiom: Axiom,
    pub character: char,
    /// Index of the character within the axiom's string form
    pub index: usize,
}

/// The characters every document starts from
#[derive(Clone, Debug, Default)]
pub struct AxiomTable {
    entries: Vec<AxiomEntry>,
}

impl AxiomTable {
    /// Scan the axioms for letters and the space
    pub fn build() -> Self {
        let mut entries: Vec<AxiomEntry> = Vec::new();

        for axiom in Axiom::ALL {
            let word = axiom.word();
            for (index, character) in word.char_indices() {
                if !(character.is_ascii_alphabetic() || character == ' ') {
                    continue;
                }
                if index > MAX_AXIOM_INDEX || entries.iter().any(|e| e.character == character) {
                    continue;
                }
                // only the first occurrence within the word counts
                if word.find(character) != Some(index) {
                    continue;
                }
                entries.push(AxiomEntry {
                    axiom,
                    character,
                    index,
                });
            }
        }

        AxiomTable { entries }
    }

    pub fn entries(&self) -> &[AxiomEntry] {
        &self.entries
    }

    /// Entries extracted at `index`, in scan order
    pub fn at_index(&self, index: usize) -> impl Iterator<Item = &AxiomEntry> {
        self.entries.iter().filter(move |e| e.index == index)
    }

    pub fn get(&self, character: char) -> Option<&AxiomEntry> {
        self.entries.iter().find(|e| e.character == character)
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
