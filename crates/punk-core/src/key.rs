//! Symbol keys and key allocation
//!
//! A [`SymbolKey`] names one property of the root namespace object. Keys are
//! made only of restricted symbols and are unique within a document.
//!
//! Fixed keys:
//! - letters: case flag (`_` lower, `$` upper) + slot in [`LETTER_CIPHER`]
//! - digits: 3 or 4 bit binary with `_` for 0 and `$` for 1
//! - space: `-`
//!
//! Dictionary keys come from a [`KeyGenerator`], a resumable bijective
//! numeral sequence that skips every key already claimed.

use std::collections::HashSet;
use std::fmt;

use crate::{encode_bijective_u64, is_symbol, Alphabet, PunkError, PunkResult, LETTER_CIPHER};

/// Key of the space entry
pub const SPACE_KEY: &str = "-";

/// Upper bound on candidate keys a generator will try
pub const DEFAULT_KEY_LIMIT: u64 = 1 << 40;

/// Property name in the emitted namespace object
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey(String);

impl SymbolKey {
    /// Create a key, checking that it is non-empty and symbol-only
    pub fn new(key: impl Into<String>) -> PunkResult<Self> {
        let key = key.into();
        if key.is_empty() || !key.chars().all(is_symbol) {
            return Err(PunkError::InvalidSymbolKey(key));
        }
        Ok(SymbolKey(key))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the key can be used after a dot (`R.key`).
    ///
    /// `_` and `$` are the only symbols allowed in identifiers.
    #[inline]
    pub fn is_identifier(&self) -> bool {
        self.0.chars().all(|c| c == '_' || c == '$')
    }

    /// Key of the space entry
    pub fn space() -> Self {
        SymbolKey(SPACE_KEY.to_string())
    }

    /// Key of an ASCII letter, `None` for anything else
    pub fn letter(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let flag = if c.is_ascii_uppercase() { '$' } else { '_' };
        let slot = (c.to_ascii_lowercase() as u8 - b'a') as usize;
        LETTER_CIPHER
            .chars()
            .nth(slot)
            .map(|symbol| SymbolKey([flag, symbol].iter().collect()))
    }

    /// Key of a decimal digit, `None` above 9
    pub fn digit(d: u8) -> Option<Self> {
        if d > 9 {
            return None;
        }
        let key = format!("{:03b}", d)
            .chars()
            .map(|bit| if bit == '0' { '_' } else { '$' })
            .collect();
        Some(SymbolKey(key))
    }
}

impl fmt::Debug for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SymbolKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Stateful sequence of unused keys.
///
/// The generator walks `1, 2, 3, ...` through bijective numerals over its
/// alphabet and never yields a claimed key or the same key twice.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    alphabet: Alphabet,
    /// Last numeral value tried
    counter: u64,
    /// Keys that must not be yielded (claimed elsewhere or already issued)
    claimed: HashSet<SymbolKey>,
    /// Maximum numeral value to try
    limit: u64,
}

impl KeyGenerator {
    /// Generator over the dictionary key alphabet
    pub fn new() -> Self {
        Self::with_alphabet(Alphabet::keys())
    }

    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        KeyGenerator {
            alphabet,
            counter: 0,
            claimed: HashSet::new(),
            limit: DEFAULT_KEY_LIMIT,
        }
    }

    /// Cap the number of candidates tried before giving up
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Mark a key as taken so it is never yielded
    pub fn claim(&mut self, key: SymbolKey) {
        self.claimed.insert(key);
    }

    pub fn claim_all<I: IntoIterator<Item = SymbolKey>>(&mut self, keys: I) {
        self.claimed.extend(keys);
    }

    /// Number of candidates tried so far
    #[inline]
    pub fn attempts(&self) -> u64 {
        self.counter
    }

    /// Next unused key
    pub fn next_key(&mut self) -> PunkResult<SymbolKey> {
        loop {
            if self.counter >= self.limit {
                return Err(PunkError::KeySpaceExhausted {
                    attempts: self.counter,
                });
            }
            self.counter += 1;

            let key = SymbolKey(encode_bijective_u64(self.counter, &self.alphabet));
            if self.claimed.insert(key.clone()) {
                return Ok(key);
            }
        }
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for KeyGenerator {
    type Item = SymbolKey;

    fn next(&mut self) -> Option<SymbolKey> {
        self.next_key().ok()
    }
}
