//! Tokenizer
//!
//! Splits text into runs with one ordered alternation; the first matching
//! category wins:
//! 1. spaces
//! 2. constant words (`true`, `NaN`, ...)
//! 3. constructor names (`Array`, `String`, ...)
//! 4. a single ASCII letter or digit
//! 5. numbers
//! 6. ASCII words
//! 7. ASCII punctuation
//! 8. C0 controls and DEL
//! 9. anything else
//!
//! Every character belongs to exactly one run and the runs concatenate
//! back to the input.

use std::fmt;

use regex::Regex;

use punk_core::{PunkError, PunkResult};

const PATTERN: &str = concat!(
    r"(?P<space> +)",
    r"|(?P<constant>(?:true|false|Infinity|NaN|undefined)(?-u:\b))",
    r"|(?P<constructor>(?:Array|Boolean|Function|Number|Object|RegExp|String)(?-u:\b))",
    r"|(?P<letter>[A-Za-z0-9](?-u:\b))",
    r"|(?P<number>[0-9]+(?-u:\b))",
    r"|(?P<word>[A-Za-z][A-Za-z0-9]*)",
    r"|(?P<symbol>[!-/:-@\[-`{-~]+)",
    r"|(?P<control>[\x00-\x1f\x7f]+)",
    r"|(?P<other>[^!-/:-@\[-`{-~ \x00-\x1f\x7f]+)",
);

/// Category of a run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunKind {
    Space,
    Constant,
    Constructor,
    Letter,
    Number,
    Word,
    Symbol,
    Control,
    Other,
}

impl RunKind {
    /// Priority order, matching the capture group names
    pub const ALL: [RunKind; 9] = [
        RunKind::Space,
        RunKind::Constant,
        RunKind::Constructor,
        RunKind::Letter,
        RunKind::Number,
        RunKind::Word,
        RunKind::Symbol,
        RunKind::Control,
        RunKind::Other,
    ];

    pub fn group(self) -> &'static str {
        match self {
            RunKind::Space => "space",
            RunKind::Constant => "constant",
            RunKind::Constructor => "constructor",
            RunKind::Letter => "letter",
            RunKind::Number => "number",
            RunKind::Word => "word",
            RunKind::Symbol => "symbol",
            RunKind::Control => "control",
            RunKind::Other => "other",
        }
    }

    /// Kinds whose runs may be compacted into the dictionary
    #[inline]
    pub fn is_compactable(self) -> bool {
        matches!(
            self,
            RunKind::Word | RunKind::Number | RunKind::Control | RunKind::Other
        )
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group())
    }
}

/// A maximal, single-category piece of the input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub kind: RunKind,
    pub text: String,
}

impl Run {
    pub fn new(kind: RunKind, text: impl Into<String>) -> Self {
        Run {
            kind,
            text: text.into(),
        }
    }

    /// Length in UTF-16 code units
    pub fn utf16_len(&self) -> usize {
        self.text.encode_utf16().count()
    }
}

/// Compiled run partition
#[derive(Clone, Debug)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    pub fn new() -> PunkResult<Self> {
        let pattern = Regex::new(PATTERN).map_err(|e| PunkError::InvalidPattern(e.to_string()))?;
        Ok(Tokenizer { pattern })
    }

    /// Partition `text` into runs
    pub fn tokenize(&self, text: &str) -> Vec<Run> {
        let mut runs = Vec::new();
        let mut last = 0;

        for caps in self.pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                runs.push(Run::new(RunKind::Other, &text[last..whole.start()]));
            }
            let kind = RunKind::ALL
                .iter()
                .copied()
                .find(|kind| caps.name(kind.group()).is_some())
                .unwrap_or(RunKind::Other);
            runs.push(Run::new(kind, whole.as_str()));
            last = whole.end();
        }
        if last < text.len() {
            runs.push(Run::new(RunKind::Other, &text[last..]));
        }

        runs
    }
}

/// Partition `text` with a freshly compiled tokenizer
pub fn tokenize(text: &str) -> PunkResult<Vec<Run>> {
    Ok(Tokenizer::new()?.tokenize(text))
}
