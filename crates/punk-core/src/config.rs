//! Encoder configuration
//!
//! All options have defaults, so an empty JSON object is a valid
//! configuration. The quote policy is written in the compact textual form
//! `"<mode> <style>..."`, e.g. `"smart backtick"` or `"cycle single double"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ident::is_bindable;
use crate::{PunkError, PunkResult};

/// Largest input accepted, in UTF-16 code units (just under 2^29)
pub const MAX_INPUT_LENGTH: usize = 536_870_888;

/// String literal delimiter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Single,
    Double,
    Backtick,
}

impl QuoteStyle {
    /// Canonical order, used to break ties
    pub const ALL: [QuoteStyle; 3] = [QuoteStyle::Single, QuoteStyle::Double, QuoteStyle::Backtick];

    #[inline]
    pub fn delimiter(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
            QuoteStyle::Backtick => '`',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QuoteStyle::Single => "single",
            QuoteStyle::Double => "double",
            QuoteStyle::Backtick => "backtick",
        }
    }
}

impl FromStr for QuoteStyle {
    type Err = PunkError;

    fn from_str(s: &str) -> PunkResult<Self> {
        match s {
            "single" => Ok(QuoteStyle::Single),
            "double" => Ok(QuoteStyle::Double),
            "backtick" => Ok(QuoteStyle::Backtick),
            other => Err(PunkError::InvalidQuotePolicy(format!(
                "unknown quote style {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the quote style of each literal is chosen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QuotePolicy {
    /// Always the given style
    Only(QuoteStyle),
    /// Round-robin over the styles, one step per literal
    Cycle(Vec<QuoteStyle>),
    /// Uniform choice among the styles
    Random(Vec<QuoteStyle>),
    /// Shortest rendering, ties go to the earliest listed style
    Smart(Vec<QuoteStyle>),
}

impl QuotePolicy {
    pub fn mode(&self) -> &'static str {
        match self {
            QuotePolicy::Only(_) => "only",
            QuotePolicy::Cycle(_) => "cycle",
            QuotePolicy::Random(_) => "random",
            QuotePolicy::Smart(_) => "smart",
        }
    }

    /// Configured styles, never empty
    pub fn styles(&self) -> Vec<QuoteStyle> {
        let styles = match self {
            QuotePolicy::Only(style) => vec![*style],
            QuotePolicy::Cycle(styles) | QuotePolicy::Random(styles) | QuotePolicy::Smart(styles) => {
                styles.clone()
            }
        };
        if styles.is_empty() {
            vec![QuoteStyle::Single]
        } else {
            styles
        }
    }
}

impl Default for QuotePolicy {
    fn default() -> Self {
        QuotePolicy::Smart(vec![QuoteStyle::Single])
    }
}

impl FromStr for QuotePolicy {
    type Err = PunkError;

    fn from_str(s: &str) -> PunkResult<Self> {
        let mut mode = None;
        let mut styles = Vec::new();

        for word in s.split(|c: char| c.is_whitespace() || c == ',').filter(|w| !w.is_empty()) {
            let word = word.to_ascii_lowercase();
            match word.as_str() {
                "only" | "cycle" | "random" | "smart" => {
                    if let Some(previous) = mode.replace(word.clone()) {
                        return Err(PunkError::InvalidQuotePolicy(format!(
                            "conflicting modes {:?} and {:?}",
                            previous, word
                        )));
                    }
                }
                _ => styles.push(word.parse::<QuoteStyle>()?),
            }
        }

        if styles.is_empty() {
            styles.push(QuoteStyle::Single);
        }

        Ok(match mode.as_deref().unwrap_or("smart") {
            "only" => QuotePolicy::Only(styles[0]),
            "cycle" => QuotePolicy::Cycle(styles),
            "random" => QuotePolicy::Random(styles),
            _ => QuotePolicy::Smart(styles),
        })
    }
}

impl fmt::Display for QuotePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode())?;
        for style in self.styles() {
            write!(f, " {}", style)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for QuotePolicy {
    type Error = PunkError;

    fn try_from(s: String) -> PunkResult<Self> {
        s.parse()
    }
}

impl From<QuotePolicy> for String {
    fn from(policy: QuotePolicy) -> String {
        policy.to_string()
    }
}

/// Keyword of the optional declaration preamble
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKeyword {
    #[default]
    Var,
    Let,
}

impl DeclarationKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKeyword::Var => "var",
            DeclarationKeyword::Let => "let",
        }
    }
}

/// How the result is handed to the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStyle {
    /// `module.exports.result=_R`
    #[default]
    CommonJs,
    /// No export statement; the final assignment is the completion value
    Binding,
}

/// Encoder configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Name of the root namespace variable
    pub root_variable: String,
    /// Emit a declaration preamble instead of assigning implicit globals
    pub strict_declaration: bool,
    pub declaration: DeclarationKeyword,
    pub quote_policy: QuotePolicy,
    /// Seed for the random quote policy
    pub quote_seed: Option<u64>,
    /// Runs must occur more often than this to enter the dictionary
    pub frequency_threshold: usize,
    /// Input limit in UTF-16 code units, clamped to [`MAX_INPUT_LENGTH`]
    pub max_input_length: usize,
    pub export: ExportStyle,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            root_variable: "$".to_string(),
            strict_declaration: false,
            declaration: DeclarationKeyword::Var,
            quote_policy: QuotePolicy::default(),
            quote_seed: None,
            frequency_threshold: 1,
            max_input_length: MAX_INPUT_LENGTH,
            export: ExportStyle::CommonJs,
        }
    }
}

impl EncoderConfig {
    /// Check the root variable.
    ///
    /// The root and the result binding `_<root>` must both be bindable
    /// identifiers that do not shadow a built-in global.
    pub fn validate(&self) -> PunkResult<()> {
        let root = &self.root_variable;
        if !is_bindable(root) || !is_bindable(&self.result_variable()) {
            return Err(PunkError::InvalidRootIdentifier(root.clone()));
        }
        Ok(())
    }

    /// Name of the binding that receives the decoded text
    pub fn result_variable(&self) -> String {
        format!("_{}", self.root_variable)
    }

    /// Effective input limit
    pub fn input_limit(&self) -> usize {
        if self.max_input_length > MAX_INPUT_LENGTH {
            warn!(
                configured = self.max_input_length,
                limit = MAX_INPUT_LENGTH,
                "max_input_length clamped"
            );
            MAX_INPUT_LENGTH
        } else {
            self.max_input_length
        }
    }

    /// Check an input length against the effective limit
    pub fn check_input_length(&self, length: usize) -> PunkResult<()> {
        let limit = self.input_limit();
        if length > limit {
            return Err(PunkError::InputTooLarge { length, limit });
        }
        Ok(())
    }
}
