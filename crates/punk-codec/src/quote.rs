//! Quoting Strategist
//!
//! Chooses the delimiter of every literal written into a document. One
//! strategist lives for one document, so the cycle position and the random
//! stream are shared by all its literals.
//!
//! Two contexts:
//! - [`QuoteContext::Literal`] - any style may be used
//! - [`QuoteContext::Key`] - object literal keys; bare identifiers are
//!   returned unquoted and backtick is never used

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use punk_core::ident::is_bare_key;
use punk_core::{QuotePolicy, QuoteStyle};

use crate::escape::{escape_literal, escaped_len};

/// Where the rendered string will appear
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteContext {
    /// A string literal expression
    Literal,
    /// A property name in an object literal
    Key,
}

/// Per-document literal renderer
#[derive(Clone, Debug)]
pub struct QuoteStrategist {
    policy: QuotePolicy,
    /// Round-robin position, advanced once per quoted string
    counter: usize,
    rng: StdRng,
}

impl QuoteStrategist {
    /// Create a strategist; `seed` makes the random policy reproducible
    pub fn new(policy: QuotePolicy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        QuoteStrategist {
            policy,
            counter: 0,
            rng,
        }
    }

    pub fn policy(&self) -> &QuotePolicy {
        &self.policy
    }

    /// Render a string literal
    #[inline]
    pub fn quote(&mut self, text: &str) -> String {
        self.choose_quote(text, QuoteContext::Literal)
    }

    /// Render an object literal key
    #[inline]
    pub fn quote_key(&mut self, text: &str) -> String {
        self.choose_quote(text, QuoteContext::Key)
    }

    /// Render `text` for `context` according to the policy
    pub fn choose_quote(&mut self, text: &str, context: QuoteContext) -> String {
        if context == QuoteContext::Key && is_bare_key(text) {
            return text.to_string();
        }

        let style = self.pick_style(text, context);
        escape_literal(text, style)
    }

    fn pick_style(&mut self, text: &str, context: QuoteContext) -> QuoteStyle {
        let styles = allowed_styles(self.policy.styles(), context);

        match &self.policy {
            QuotePolicy::Only(_) => styles[0],
            QuotePolicy::Cycle(_) => {
                let style = styles[self.counter % styles.len()];
                self.counter = self.counter.wrapping_add(1);
                style
            }
            QuotePolicy::Random(_) => styles[self.rng.gen_range(0..styles.len())],
            QuotePolicy::Smart(_) => shortest_style(text, &styles, context),
        }
    }
}

/// Drop backtick in key context, falling back to single quotes
fn allowed_styles(styles: Vec<QuoteStyle>, context: QuoteContext) -> Vec<QuoteStyle> {
    if context == QuoteContext::Literal {
        return styles;
    }
    let styles: Vec<QuoteStyle> = styles
        .into_iter()
        .filter(|&s| s != QuoteStyle::Backtick)
        .collect();
    if styles.is_empty() {
        vec![QuoteStyle::Single]
    } else {
        styles
    }
}

/// Shortest rendering; ties go to the first preferred style, then to the
/// canonical order
fn shortest_style(text: &str, preferred: &[QuoteStyle], context: QuoteContext) -> QuoteStyle {
    let candidates: Vec<(QuoteStyle, usize)> = QuoteStyle::ALL
        .iter()
        .filter(|&&s| context == QuoteContext::Literal || s != QuoteStyle::Backtick)
        .map(|&s| (s, escaped_len(text, s)))
        .collect();

    let best = candidates.iter().map(|&(_, len)| len).min().unwrap_or(0);
    let is_best = |style: &QuoteStyle| candidates.contains(&(*style, best));

    preferred
        .iter()
        .copied()
        .find(is_best)
        .or_else(|| QuoteStyle::ALL.iter().copied().find(is_best))
        .unwrap_or(QuoteStyle::Single)
}
