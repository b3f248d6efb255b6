//! Round-trip harness
//!
//! Encodes each scenario and checks the emitted document:
//! - the body evaluates back to the input
//! - every namespace key is distinct and committed
//! - the dictionary only holds frequent, otherwise unresolvable runs
//! - the generated statements use symbols only

use std::collections::HashSet;

use tracing::debug;

use punk_core::{EncoderConfig, ExportStyle, PunkError};
use punk_encoder::{generate_document, is_resolvable, EmittedDocument, EncodingStats, Run, RunKind};

use crate::corpus::Scenario;

/// Outcome of one scenario
#[derive(Debug, Clone)]
pub struct RoundTripResult {
    pub name: &'static str,

    /// Document stats, when one was generated
    pub stats: Option<EncodingStats>,

    /// Generation error, if any
    pub error: Option<PunkError>,

    /// Broken document invariants
    pub violations: Vec<String>,
}

impl RoundTripResult {
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.violations.is_empty()
    }
}

/// Check an emitted document against the input it was generated from
pub fn check_document(doc: &EmittedDocument, input: &str, config: &EncoderConfig) -> Vec<String> {
    let mut violations = Vec::new();

    match doc.evaluate() {
        Ok(output) if output == input => {}
        Ok(output) => violations.push(format!("body evaluates to {:?}", output)),
        Err(e) => violations.push(format!("body does not evaluate: {}", e)),
    }

    let ns = doc.namespace();
    let keys: HashSet<_> = ns.keys().collect();
    if keys.len() != ns.len() {
        violations.push(format!("{} keys for {} entries", keys.len(), ns.len()));
    }
    if let Some(entry) = ns.entries().iter().find(|e| !e.is_committed()) {
        violations.push(format!("entry {} never committed", entry.name));
    }

    for entry in doc.dictionary().entries() {
        if entry.frequency <= config.frequency_threshold {
            violations.push(format!("{:?} below threshold", entry.text));
        }
        if is_resolvable(ns, &Run::new(RunKind::Word, entry.text.clone())) {
            violations.push(format!("{:?} was already resolvable", entry.text));
        }
    }

    let result = config.result_variable();
    let root = &config.root_variable;
    let statements = doc.statements();
    let first = usize::from(config.strict_declaration);
    let last = statements
        .len()
        .saturating_sub(usize::from(config.export == ExportStyle::CommonJs));
    for statement in statements.get(first..last).unwrap_or_default() {
        let stripped = statement.replace(&result, "").replace(root.as_str(), "");
        if let Some(c) = stripped.chars().find(|c| c.is_ascii_alphanumeric() || !c.is_ascii()) {
            violations.push(format!("{:?} outside the symbol alphabet", c));
            break;
        }
    }

    if config.export == ExportStyle::CommonJs
        && !doc.source().ends_with(&format!("module.exports.result={}", result))
    {
        violations.push("missing export statement".into());
    }
    if doc.stats().input_length != input.encode_utf16().count() {
        violations.push("input length mismatch".into());
    }

    violations
}

/// Encode one scenario and check the result
pub fn run_scenario(scenario: &Scenario) -> RoundTripResult {
    let result = match generate_document(&scenario.input, &scenario.config) {
        Ok(doc) => RoundTripResult {
            name: scenario.name,
            stats: Some(doc.stats().clone()),
            error: None,
            violations: check_document(&doc, &scenario.input, &scenario.config),
        },
        Err(e) => RoundTripResult {
            name: scenario.name,
            stats: None,
            error: Some(e),
            violations: Vec::new(),
        },
    };
    debug!(
        scenario = scenario.name,
        passed = result.passed(),
        violations = result.violations.len(),
        "scenario finished"
    );
    result
}

/// Run every scenario
pub fn run_corpus(scenarios: &[Scenario]) -> Vec<RoundTripResult> {
    scenarios.iter().map(run_scenario).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{random_text, scenarios};
    use proptest::prelude::*;
    use punk_encoder::Expr;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_corpus_passes() {
        for result in run_corpus(&scenarios()) {
            assert!(result.passed(), "{}: {:?} {:?}", result.name, result.error, result.violations);
        }
    }

    #[test]
    fn test_empty_input() {
        let doc = generate_document("", &EncoderConfig::default()).unwrap();
        assert_eq!(doc.evaluate().unwrap(), "");
        assert_eq!(doc.expression(), "''");
    }

    #[test]
    fn test_single_letter_is_not_decoded() {
        let doc = generate_document("a", &EncoderConfig::default()).unwrap();
        assert!(doc
            .body()
            .terms()
            .iter()
            .all(|t| !matches!(t, Expr::Decode(_))));
    }

    #[test]
    fn test_repeated_runs_use_dictionary() {
        let text = "aaaa aaaa aaaa";
        let with = generate_document(text, &EncoderConfig::default()).unwrap();
        let entry = with.dictionary().get("aaaa").unwrap();
        assert_eq!(entry.frequency, 3);
        let references = with
            .body()
            .terms()
            .iter()
            .filter(|t| **t == Expr::Slot(entry.key.clone()))
            .count();
        assert_eq!(references, 3);

        let config = EncoderConfig {
            frequency_threshold: 3,
            ..Default::default()
        };
        let without = generate_document(text, &config).unwrap();
        assert!(without.dictionary().is_empty());
        assert!(with.stats().document_length < without.stats().document_length);
    }

    #[test]
    fn test_mixed_quotes_stay_cheap() {
        let text = "\"'`";
        let doc = generate_document(text, &EncoderConfig::default()).unwrap();
        assert_eq!(doc.evaluate().unwrap(), text);
        // One of the three delimiters is escaped, never all of them
        assert_eq!(doc.expression().matches('\\').count(), 1);
    }

    #[test]
    fn test_input_too_large() {
        let config = EncoderConfig {
            max_input_length: 10,
            ..Default::default()
        };
        let text = "x".repeat(11);
        assert_eq!(
            generate_document(&text, &config).unwrap_err(),
            PunkError::InputTooLarge { length: 11, limit: 10 }
        );
        // Astral characters count as two code units
        assert!(generate_document(&"\u{1f600}".repeat(5), &config).is_ok());
        assert!(generate_document(&"\u{1f600}".repeat(6), &config).is_err());
    }

    #[test]
    fn test_reserved_root() {
        for root in ["Array", "String", "eval", "module"] {
            let config = EncoderConfig {
                root_variable: root.into(),
                ..Default::default()
            };
            assert_eq!(
                generate_document("x", &config).unwrap_err(),
                PunkError::InvalidRootIdentifier(root.into())
            );
        }
    }

    #[test]
    fn test_random_corpus() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..20 {
            let text = random_text(&mut rng, 40);
            let scenario = Scenario::new("random", text);
            let result = run_scenario(&scenario);
            assert!(result.passed(), "{:?}: {:?}", scenario.input, result.violations);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_reference_roundtrip(text in any::<String>(), threshold in 0usize..4) {
            let config = EncoderConfig {
                frequency_threshold: threshold,
                ..Default::default()
            };
            let doc = generate_document(&text, &config).unwrap();
            let violations = check_document(&doc, &text, &config);
            prop_assert!(violations.is_empty(), "{:?}", violations);
        }
    }
}
