//! Symbol alphabets
//!
//! The emitted document is restricted to the 32 ASCII punctuation symbols.
//! Several fixed orderings of (subsets of) those symbols are used:
//! - [`KEY_ALPHABET`] - digits of dictionary keys (bijective base 32)
//! - [`RUN_CIPHER`] - digits of encoded code units (base 31)
//! - [`LETTER_CIPHER`] - slot symbol of each letter key (a..z)

use std::collections::HashMap;
use std::fmt;

use crate::{PunkError, PunkResult};

/// Every printable ASCII symbol that is neither a letter, a digit nor a space
pub const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Digit order for generated dictionary keys
pub const KEY_ALPHABET: &str = "_$.:;!?*+^-=<>~/|#%&@{}()[],'\"`\\";

/// Digit order for the code-unit cipher (everything except the separator)
pub const RUN_CIPHER: &str = "_$.:;!?*+^-=<>~/|#%&@{}()[]'\"`\\";

/// Separator between encoded code units
pub const RUN_SEPARATOR: char = ',';

/// Slot symbol for the letters `a..z`, in order
pub const LETTER_CIPHER: &str = ";.!:_-,?/'*+#%&^\"|~$=<>`@\\";

/// Returns true if `c` is one of the 32 restricted output symbols
#[inline]
pub fn is_symbol(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// An ordered set of distinct symbols used as numeral digits
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from a sequence of symbols.
    ///
    /// Repeated symbols are dropped, keeping the first occurrence.
    pub fn new(symbols: &str) -> PunkResult<Self> {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();
        for c in symbols.chars() {
            if !index.contains_key(&c) {
                index.insert(c, ordered.len());
                ordered.push(c);
            }
        }

        if ordered.is_empty() {
            return Err(PunkError::InvalidAlphabet("alphabet is empty".into()));
        }

        Ok(Alphabet {
            symbols: ordered,
            index,
        })
    }

    /// Alphabet of dictionary key digits
    pub fn keys() -> Self {
        Self::from_static(KEY_ALPHABET)
    }

    /// Alphabet of code-unit digits
    pub fn run_cipher() -> Self {
        Self::from_static(RUN_CIPHER)
    }

    fn from_static(symbols: &'static str) -> Self {
        let ordered: Vec<char> = symbols.chars().collect();
        let index = ordered.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet {
            symbols: ordered,
            index,
        }
    }

    /// Number of digits
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at position `i`
    #[inline]
    pub fn symbol(&self, i: usize) -> Option<char> {
        self.symbols.get(i).copied()
    }

    /// Position of symbol `c`
    #[inline]
    pub fn position(&self, c: char) -> Option<usize> {
        self.index.get(&c).copied()
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// The alphabet as a string, in digit order
    pub fn as_string(&self) -> String {
        self.symbols.iter().collect()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({:?})", self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_symbol_set() {
        assert_eq!(SYMBOLS.len(), 32);
        assert!(SYMBOLS.chars().all(is_symbol));
        assert!(!is_symbol('a'));
        assert!(!is_symbol(' '));
        assert!(!is_symbol('7'));
    }

    #[test]
    fn test_fixed_alphabets_are_permutations() {
        let all: HashSet<char> = SYMBOLS.chars().collect();

        let keys: HashSet<char> = KEY_ALPHABET.chars().collect();
        assert_eq!(KEY_ALPHABET.len(), 32);
        assert_eq!(keys, all);

        let run: HashSet<char> = RUN_CIPHER.chars().collect();
        assert_eq!(RUN_CIPHER.len(), 31);
        assert!(!run.contains(&RUN_SEPARATOR));
        assert_eq!(run.len() + 1, all.len());

        let letters: HashSet<char> = LETTER_CIPHER.chars().collect();
        assert_eq!(LETTER_CIPHER.len(), 26);
        assert_eq!(letters.len(), 26);
    }

    #[test]
    fn test_alphabet_dedup() {
        let a = Alphabet::new("abca").unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a.position('c'), Some(2));
        assert_eq!(a.symbol(3), None);
        assert_eq!(a.as_string(), "abc");
    }

    #[test]
    fn test_alphabet_empty() {
        assert!(matches!(
            Alphabet::new(""),
            Err(PunkError::InvalidAlphabet(_))
        ));
    }
}
