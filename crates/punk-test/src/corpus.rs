//! Scenario corpus
//!
//! Inputs that exercise every path of the assembler: empty and single
//! character inputs, every reserved symbol, mixed scripts, repeated runs,
//! clashing quotes and inputs sitting exactly on the length limit.

use rand::Rng;

use punk_core::{EncoderConfig, ExportStyle, QuotePolicy, QuoteStyle, SYMBOLS};

/// One named input with the configuration to encode it under
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub input: String,
    pub config: EncoderConfig,
}

impl Scenario {
    /// Scenario under the default configuration
    pub fn new(name: &'static str, input: impl Into<String>) -> Self {
        Self {
            name,
            input: input.into(),
            config: EncoderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EncoderConfig) -> Self {
        self.config = config;
        self
    }
}

/// The standard corpus
pub fn scenarios() -> Vec<Scenario> {
    let repeated = "aaaa aaaa aaaa";
    let limit_text = "near the limit";

    vec![
        Scenario::new("empty", ""),
        Scenario::new("single_letter", "a"),
        Scenario::new("single_upper", "Q"),
        Scenario::new("single_digit", "7"),
        Scenario::new("single_space", " "),
        Scenario::new("symbols", SYMBOLS),
        Scenario::new("symbols_spaced", SYMBOLS.chars().map(|c| format!("{c} ")).collect::<String>()),
        Scenario::new("mixed_scripts", "Hello \u{4e16}\u{754c}, \u{3b3}\u{3b5}\u{3b9}\u{3ac} caf\u{e9} \u{1f600}!"),
        Scenario::new("repeated_runs", repeated),
        Scenario::new("mixed_quotes", "say \"it's `here`\" and 'there'"),
        Scenario::new("controls", "line one\nline two\r\n\ttab\u{0}\u{7f}"),
        Scenario::new("constants", "true false undefined NaN Infinity"),
        Scenario::new("embedded_constants", "is_true_x is_true_y is_true_z Array_a Array_b"),
        Scenario::new("constructors", "new Array(new Number(1)), String(x) instanceof Object"),
        Scenario::new("numbers", "0 7 42 1984 3.14159 0x1f 123456789012345678901234567890"),
        Scenario::new(
            "program",
            "function greet(name) {\n  return `Hello, ${name}!`;\n}\nconsole.log(greet(\"world\"));\n",
        ),
        Scenario::new("spaces", "a    b        c"),
        Scenario::new("at_limit", limit_text).with_config(EncoderConfig {
            max_input_length: limit_text.len(),
            ..Default::default()
        }),
        Scenario::new("strict_let", "let it be").with_config(EncoderConfig {
            strict_declaration: true,
            declaration: punk_core::DeclarationKeyword::Let,
            ..Default::default()
        }),
        Scenario::new("custom_root", "rooted somewhere else").with_config(EncoderConfig {
            root_variable: "zz".into(),
            export: ExportStyle::Binding,
            ..Default::default()
        }),
        Scenario::new("cycle_quotes", "'a' \"b\" `c` 'a' \"b\" `c`").with_config(EncoderConfig {
            quote_policy: QuotePolicy::Cycle(QuoteStyle::ALL.to_vec()),
            ..Default::default()
        }),
        Scenario::new("random_quotes", "x = ['1', \"2\", `3`];").with_config(EncoderConfig {
            quote_policy: QuotePolicy::Random(QuoteStyle::ALL.to_vec()),
            quote_seed: Some(0xC0FFEE),
            ..Default::default()
        }),
        Scenario::new("no_dictionary", repeated).with_config(EncoderConfig {
            frequency_threshold: usize::MAX,
            ..Default::default()
        }),
    ]
}

const WORDS: &[&str] = &[
    "var", "function", "return", "map", "split", "true", "Array", "foo", "bar", "the",
];

const PIECES: &[&str] = &[
    " ", "  ", "\n", "\t", "(", ")", "{", "}", ";", "'", "\"", "`", "${", "\\", "42", "7",
    "\u{e9}", "\u{4e2d}", "\u{1f600}", "\u{0}",
];

/// Random text mixing words, symbols, digits and non-ASCII pieces
pub fn random_text<R: Rng>(rng: &mut R, pieces: usize) -> String {
    let mut text = String::new();
    for _ in 0..pieces {
        if rng.gen_bool(0.5) {
            text.push_str(WORDS[rng.gen_range(0..WORDS.len())]);
        } else {
            text.push_str(PIECES[rng.gen_range(0..PIECES.len())]);
        }
    }
    text
}
