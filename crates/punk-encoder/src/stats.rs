//! Document statistics

use std::fmt;

use serde::{Deserialize, Serialize};

/// Size report of one generated document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodingStats {
    /// Input length in UTF-16 code units
    pub input_length: usize,
    /// Length of the assembled expression
    pub expression_length: usize,
    /// `expression_length / input_length`, undefined for empty input
    pub ratio: Option<f64>,
    /// Length of the whole document
    pub document_length: usize,
}

impl EncodingStats {
    pub fn new(input_length: usize, expression_length: usize, document_length: usize) -> Self {
        let ratio = if input_length == 0 {
            None
        } else {
            Some(expression_length as f64 / input_length as f64)
        };
        EncodingStats {
            input_length,
            expression_length,
            ratio,
            document_length,
        }
    }
}

/// `1234567` -> `1,234,567`
fn grouped(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for EncodingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=====")?;
        writeln!(f, "STATS")?;
        writeln!(f, "=====")?;
        writeln!(f, "Input length: {}", grouped(self.input_length))?;
        writeln!(f, "Expression length: {}", grouped(self.expression_length))?;
        match self.ratio {
            Some(ratio) => writeln!(f, "Ratio: {}", ratio)?,
            None => writeln!(f, "Ratio: -")?,
        }
        write!(f, "Output length: {}", grouped(self.document_length))
    }
}
