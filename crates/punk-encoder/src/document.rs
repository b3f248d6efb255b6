//! Staged document generation
//!
//! [`Encoder`] is a state machine; every stage checks the current state
//! before it runs, so stages can only execute in this order:
//!
//! ```text
//! Init -> AxiomsBuilt -> LettersDerived -> IdentifiersDerived
//!      -> CodecEmitted -> DictionaryBuilt -> Assembled -> Exported
//! ```
//!
//! Each stage appends the statements it produces. A failure aborts the
//! whole generation; no partial document is ever returned.

use tracing::{debug, info};

use punk_codec::{QuoteStrategist, RunCodec};
use punk_core::{EncoderConfig, ExportStyle, KeyGenerator, PunkError, PunkResult};

use crate::assembler::{is_resolvable, Assembler};
use crate::axioms::AxiomTable;
use crate::decoder::derive_decoder;
use crate::dictionary::Dictionary;
use crate::expr::Expr;
use crate::identifiers::{self, derive_globals, derive_to_string};
use crate::letters::{
    derive_constructor_letters, derive_escape_letters, derive_late_letters, derive_seed,
};
use crate::namespace::{Namespace, Stage};
use crate::reflector::{RuntimeReflector, V8Reflector};
use crate::stats::EncodingStats;
use crate::tokenizer::{Run, Tokenizer};

/// Position of an [`Encoder`] in the pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelineState {
    Init,
    AxiomsBuilt,
    LettersDerived,
    IdentifiersDerived,
    CodecEmitted,
    DictionaryBuilt,
    Assembled,
    Exported,
}

impl PipelineState {
    pub fn name(self) -> &'static str {
        match self {
            PipelineState::Init => "init",
            PipelineState::AxiomsBuilt => "axioms-built",
            PipelineState::LettersDerived => "letters-derived",
            PipelineState::IdentifiersDerived => "identifiers-derived",
            PipelineState::CodecEmitted => "codec-emitted",
            PipelineState::DictionaryBuilt => "dictionary-built",
            PipelineState::Assembled => "assembled",
            PipelineState::Exported => "exported",
        }
    }
}

/// A generated document
#[derive(Clone, Debug)]
pub struct EmittedDocument {
    statements: Vec<String>,
    expression: String,
    body: Expr,
    namespace: Namespace,
    dictionary: Dictionary,
    codec: RunCodec,
    source: String,
    stats: EncodingStats,
}

impl EmittedDocument {
    /// Full document text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Statements in emission order
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Rendered body expression (right-hand side of `_R=`)
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn body(&self) -> &Expr {
        &self.body
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn stats(&self) -> &EncodingStats {
        &self.stats
    }

    /// Text the body reconstructs, computed from the recorded namespace
    /// values without a script interpreter
    pub fn evaluate(&self) -> PunkResult<String> {
        self.body.evaluate(&self.namespace, &self.codec)
    }
}

/// Staged generator of one document
pub struct Encoder<'r> {
    config: EncoderConfig,
    reflector: &'r dyn RuntimeReflector,
    quotes: QuoteStrategist,
    codec: RunCodec,
    tokenizer: Tokenizer,
    namespace: Namespace,
    table: AxiomTable,
    dictionary: Dictionary,
    runs: Vec<Run>,
    input_length: usize,
    body: Expr,
    expression: String,
    statements: Vec<String>,
    state: PipelineState,
}

impl<'r> Encoder<'r> {
    /// Create an encoder; fails on an invalid root variable
    pub fn new(config: EncoderConfig, reflector: &'r dyn RuntimeReflector) -> PunkResult<Self> {
        config.validate()?;
        let quotes = QuoteStrategist::new(config.quote_policy.clone(), config.quote_seed);
        let namespace = Namespace::new(config.root_variable.clone());

        Ok(Encoder {
            config,
            reflector,
            quotes,
            codec: RunCodec::new(),
            tokenizer: Tokenizer::new()?,
            namespace,
            table: AxiomTable::default(),
            dictionary: Dictionary::new(),
            runs: Vec::new(),
            input_length: 0,
            body: Expr::Concat(Vec::new()),
            expression: String::new(),
            statements: Vec::new(),
            state: PipelineState::Init,
        })
    }

    #[inline]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    fn expect_state(&self, expected: PipelineState) -> PunkResult<()> {
        if self.state != expected {
            return Err(PunkError::StageOrder {
                expected: expected.name(),
                actual: self.state.name(),
            });
        }
        Ok(())
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(
            from = self.state.name(),
            to = next.name(),
            statements = self.statements.len(),
            entries = self.namespace.len(),
            "pipeline transition"
        );
        self.state = next;
    }

    /// Commit pending namespace entries as one statement
    fn flush(&mut self) {
        if let Some(statement) = self.namespace.flush(&mut self.quotes) {
            self.statements.push(statement);
        }
    }

    /// Declaration preamble, the digit counter and the axiom table
    pub fn build_axioms(&mut self) -> PunkResult<()> {
        self.expect_state(PipelineState::Init)?;

        let root = self.namespace.root().to_string();
        if self.config.strict_declaration {
            self.statements.push(format!(
                "{} {},{}",
                self.config.declaration.as_str(),
                root,
                self.config.result_variable()
            ));
        }
        self.statements.push(format!("{}=~[]", root));
        self.table = AxiomTable::build();

        self.transition(PipelineState::AxiomsBuilt);
        Ok(())
    }

    /// Seed letters and digits, structural identifiers, constructor letters
    pub fn derive_letters(&mut self) -> PunkResult<()> {
        self.expect_state(PipelineState::AxiomsBuilt)?;

        derive_seed(&mut self.namespace, &self.table, &mut self.quotes)?;
        self.flush();
        identifiers::derive_identifiers(
            &mut self.namespace,
            identifiers::STRUCTURAL,
            Stage::Structural,
            &mut self.quotes,
        )?;
        self.flush();
        derive_constructor_letters(&mut self.namespace, self.reflector, &mut self.quotes)?;
        self.flush();

        self.transition(PipelineState::LettersDerived);
        Ok(())
    }

    /// Reflective identifiers, globals, conversions, late letters and late
    /// identifiers
    pub fn derive_identifiers(&mut self) -> PunkResult<()> {
        self.expect_state(PipelineState::LettersDerived)?;

        identifiers::derive_identifiers(
            &mut self.namespace,
            identifiers::REFLECTIVE,
            Stage::Reflective,
            &mut self.quotes,
        )?;
        self.flush();
        derive_globals(&mut self.namespace, &mut self.quotes)?;
        self.flush();
        derive_to_string(&mut self.namespace, &mut self.quotes)?;
        derive_escape_letters(&mut self.namespace, &mut self.quotes)?;
        self.flush();
        derive_late_letters(&mut self.namespace, &mut self.quotes)?;
        self.flush();
        identifiers::derive_identifiers(
            &mut self.namespace,
            identifiers::LATE,
            Stage::LateIdentifiers,
            &mut self.quotes,
        )?;
        self.flush();

        self.transition(PipelineState::IdentifiersDerived);
        Ok(())
    }

    /// The decoder macro
    pub fn emit_codec(&mut self) -> PunkResult<()> {
        self.expect_state(PipelineState::IdentifiersDerived)?;

        let param = self.config.result_variable();
        derive_decoder(&mut self.namespace, &self.codec, &param, &mut self.quotes)?;
        self.flush();

        self.transition(PipelineState::CodecEmitted);
        Ok(())
    }

    /// Tokenize `text` and bind its frequent runs
    pub fn build_dictionary(&mut self, text: &str) -> PunkResult<()> {
        self.build_dictionary_counted(text, text.encode_utf16().count())
    }

    /// [`Encoder::build_dictionary`] with the UTF-16 length already known
    fn build_dictionary_counted(&mut self, text: &str, length: usize) -> PunkResult<()> {
        self.expect_state(PipelineState::CodecEmitted)?;

        self.config.check_input_length(length)?;
        self.input_length = length;
        self.runs = self.tokenizer.tokenize(text);

        let mut keys = KeyGenerator::new();
        keys.claim_all(self.namespace.keys().cloned());

        let namespace = &self.namespace;
        self.dictionary = Dictionary::build(
            &self.runs,
            self.config.frequency_threshold,
            |run| is_resolvable(namespace, run),
            &mut keys,
            &self.codec,
        )?;
        self.dictionary.bind_into(&mut self.namespace, &mut self.quotes)?;
        self.flush();

        self.transition(PipelineState::DictionaryBuilt);
        Ok(())
    }

    /// Body expression and the result assignment
    pub fn assemble(&mut self) -> PunkResult<()> {
        self.expect_state(PipelineState::DictionaryBuilt)?;

        self.body = Assembler::new(&self.namespace, &self.dictionary, &self.codec).assemble(&self.runs);
        self.expression = self.body.render(&self.namespace, &mut self.quotes)?;
        self.statements.push(format!(
            "{}={}",
            self.config.result_variable(),
            self.expression
        ));

        self.transition(PipelineState::Assembled);
        Ok(())
    }

    /// Export statement and the finished document
    pub fn export(mut self) -> PunkResult<EmittedDocument> {
        self.expect_state(PipelineState::Assembled)?;

        if self.config.export == ExportStyle::CommonJs {
            self.statements
                .push(format!("module.exports.result={}", self.config.result_variable()));
        }
        self.transition(PipelineState::Exported);

        let source = self.statements.join(";");
        let stats = EncodingStats::new(self.input_length, self.expression.len(), source.len());
        info!(
            input_length = stats.input_length,
            expression_length = stats.expression_length,
            document_length = stats.document_length,
            entries = self.namespace.len(),
            dictionary = self.dictionary.len(),
            "document generated"
        );

        Ok(EmittedDocument {
            statements: self.statements,
            expression: self.expression,
            body: self.body,
            namespace: self.namespace,
            dictionary: self.dictionary,
            codec: self.codec,
            source,
            stats,
        })
    }

    /// Run every stage over `text`. The input length is checked before
    /// anything is generated.
    pub fn encode(mut self, text: &str) -> PunkResult<EmittedDocument> {
        let length = text.encode_utf16().count();
        self.config.check_input_length(length)?;

        self.build_axioms()?;
        self.derive_letters()?;
        self.derive_identifiers()?;
        self.emit_codec()?;
        self.build_dictionary_counted(text, length)?;
        self.assemble()?;
        self.export()
    }
}

/// Generate a document with a custom runtime reflector
pub fn encode_with(
    text: &str,
    config: &EncoderConfig,
    reflector: &dyn RuntimeReflector,
) -> PunkResult<EmittedDocument> {
    Encoder::new(config.clone(), reflector)?.encode(text)
}

/// Generate a document for the V8 string forms
pub fn generate_document(text: &str, config: &EncoderConfig) -> PunkResult<EmittedDocument> {
    encode_with(text, config, &V8Reflector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axioms::Axiom;
    use crate::namespace::Name;
    use punk_core::{QuotePolicy, QuoteStyle};
    use std::collections::HashSet;

    fn binding() -> EncoderConfig {
        EncoderConfig {
            export: ExportStyle::Binding,
            quote_seed: Some(7),
            ..Default::default()
        }
    }

    fn roundtrip(text: &str, config: &EncoderConfig) -> EmittedDocument {
        let doc = generate_document(text, config).unwrap();
        assert_eq!(doc.evaluate().unwrap(), text);
        doc
    }

    #[test]
    fn test_empty_input() {
        let doc = roundtrip("", &EncoderConfig::default());
        assert!(doc.source().contains("_$=''"));
        assert!(doc.source().ends_with(";module.exports.result=_$"));
        assert_eq!(doc.stats().input_length, 0);
        assert_eq!(doc.stats().ratio, None);
        assert!(doc.dictionary().is_empty());
    }

    #[test]
    fn test_single_letter_uses_slot() {
        let doc = roundtrip("a", &EncoderConfig::default());
        assert_eq!(doc.body().terms().len(), 1);
        assert!(matches!(doc.body().terms()[0], Expr::Slot(_)));
        assert_eq!(doc.expression(), "$['_;']");
    }

    #[test]
    fn test_dictionary_shortens_document() {
        let text = "aaaa aaaa aaaa";
        let with = roundtrip(text, &EncoderConfig::default());
        let entry = with.dictionary().get("aaaa").unwrap();
        assert_eq!(entry.frequency, 3);

        let without = roundtrip(
            text,
            &EncoderConfig {
                frequency_threshold: usize::MAX,
                ..Default::default()
            },
        );
        assert!(without.dictionary().is_empty());
        assert!(with.source().len() < without.source().len());
    }

    #[test]
    fn test_mixed_quotes() {
        let text = "say \"it's `here`\"";
        let doc = roundtrip(text, &EncoderConfig::default());
        let literals: Vec<&Expr> = doc
            .body()
            .terms()
            .iter()
            .filter(|t| matches!(t, Expr::Literal(_)))
            .collect();
        assert!(!literals.is_empty());
        assert!(!doc.expression().contains("\\'\\\"\\`"));
    }

    #[test]
    fn test_input_too_large() {
        let config = EncoderConfig {
            max_input_length: 3,
            ..Default::default()
        };
        assert!(generate_document("abc", &config).is_ok());
        assert_eq!(
            generate_document("abcd", &config).unwrap_err(),
            PunkError::InputTooLarge { length: 4, limit: 3 }
        );
    }

    #[test]
    fn test_input_checked_before_generation() {
        let config = EncoderConfig {
            max_input_length: 2,
            ..Default::default()
        };
        // Astral characters count as two code units
        assert!(generate_document("\u{1f600}", &config).is_ok());
        let encoder = Encoder::new(config.clone(), &V8Reflector).unwrap();
        assert_eq!(
            encoder.encode("a\u{1f600}").unwrap_err(),
            PunkError::InputTooLarge { length: 3, limit: 2 }
        );

        let mut encoder = Encoder::new(config, &V8Reflector).unwrap();
        encoder.build_axioms().unwrap();
        encoder.derive_letters().unwrap();
        encoder.derive_identifiers().unwrap();
        encoder.emit_codec().unwrap();
        assert_eq!(
            encoder.build_dictionary("abc"),
            Err(PunkError::InputTooLarge { length: 3, limit: 2 })
        );
        assert_eq!(encoder.state(), PipelineState::CodecEmitted);
    }

    #[test]
    fn test_invalid_root() {
        let config = EncoderConfig {
            root_variable: "Array".into(),
            ..Default::default()
        };
        assert_eq!(
            generate_document("x", &config).unwrap_err(),
            PunkError::InvalidRootIdentifier("Array".into())
        );
    }

    #[test]
    fn test_stage_order() {
        let mut encoder = Encoder::new(EncoderConfig::default(), &V8Reflector).unwrap();
        assert_eq!(
            encoder.derive_letters(),
            Err(PunkError::StageOrder {
                expected: "axioms-built",
                actual: "init"
            })
        );
        encoder.build_axioms().unwrap();
        assert!(encoder.build_axioms().is_err());
        assert_eq!(encoder.state(), PipelineState::AxiomsBuilt);
        encoder.derive_letters().unwrap();
        assert!(encoder.emit_codec().is_err());
        assert_eq!(encoder.state(), PipelineState::LettersDerived);
    }

    #[test]
    fn test_document_layout() {
        let config = EncoderConfig {
            strict_declaration: true,
            declaration: punk_core::DeclarationKeyword::Let,
            ..Default::default()
        };
        let doc = roundtrip("hello", &config);
        let statements = doc.statements();
        assert_eq!(statements[0], "let $,_$");
        assert_eq!(statements[1], "$=~[]");
        assert!(statements[2].starts_with("$={___:`${++$}`"));
        assert!(statements[3].starts_with("$={...$,"));
        assert_eq!(statements.last().unwrap(), "module.exports.result=_$");
        assert_eq!(doc.source(), statements.join(";"));
    }

    #[test]
    fn test_symbol_only_body() {
        let text = "function hello(world) { return 42 + world.length; }\n";
        let doc = roundtrip(text, &binding());
        let stripped = doc.source().replace("_$", "").replace('$', "");
        assert!(
            stripped.chars().all(|c| !c.is_ascii_alphanumeric()),
            "{}",
            stripped
        );
        assert!(doc.source().is_ascii());
    }

    #[test]
    fn test_namespace_keys_are_unique() {
        let text = "the quick brown fox jumps over the lazy dog the end\n\n";
        let doc = roundtrip(text, &EncoderConfig::default());
        let keys: HashSet<_> = doc.namespace().keys().collect();
        assert_eq!(keys.len(), doc.namespace().len());
        assert!(doc.dictionary().get("the").is_some());
        assert!(doc.namespace().entries().iter().all(|e| e.is_committed()));
    }

    #[test]
    fn test_every_letter_is_derived() {
        let doc = roundtrip("", &EncoderConfig::default());
        let ns = doc.namespace();
        for c in ('a'..='z').chain('0'..='9') {
            assert!(ns.has(&Name::Char(c)), "{c}");
        }
        for c in "ABCDEFINORSU".chars() {
            assert!(ns.has(&Name::Char(c)), "{c}");
        }
        assert!(ns.has(&Name::Char(' ')));
        assert!(ns.has(&Name::Decoder));
    }

    #[test]
    fn test_other_roots_and_quotes() {
        let text = "Why? Because 1984 \u{1f600} caf\u{e9} \u{4e2d}\u{6587}!";
        for root in ["abc", "_x", "$$"] {
            for policy in ["only double", "cycle single double backtick", "random single backtick"] {
                let config = EncoderConfig {
                    root_variable: root.into(),
                    quote_policy: policy.parse::<QuotePolicy>().unwrap(),
                    quote_seed: Some(3),
                    ..Default::default()
                };
                let doc = roundtrip(text, &config);
                assert!(doc.source().starts_with(&format!("{}=~[]", root)));
            }
        }
    }

    #[test]
    fn test_constants_and_constructor_names() {
        let doc = roundtrip("true false undefined NaN Infinity Array String", &binding());
        let terms = doc.body().terms();
        assert!(terms.contains(&Expr::Constant(Axiom::True)));
        assert!(terms.contains(&Expr::Constant(Axiom::Undefined)));
        assert!(terms
            .iter()
            .any(|t| matches!(t, Expr::ConstructorName(crate::reflector::Construct::Array))));
    }

    #[test]
    fn test_embedded_constants_never_enter_dictionary() {
        let doc = roundtrip("is_true_x is_true_y is_true_z Array_a Array_b", &binding());
        assert!(doc.dictionary().get("true").is_none());
        assert!(doc.dictionary().get("Array").is_none());
        assert!(doc.dictionary().get("is").is_some());
        let terms = doc.body().terms();
        assert!(terms.contains(&Expr::Constant(Axiom::True)));
        assert!(terms.contains(&Expr::ConstructorName(crate::reflector::Construct::Array)));
    }

    #[test]
    fn test_only_double_quotes() {
        let config = EncoderConfig {
            quote_policy: QuotePolicy::Only(QuoteStyle::Double),
            ..Default::default()
        };
        let doc = roundtrip("x = 'y';", &config);
        assert!(!doc.expression().contains('`'));
    }
}
