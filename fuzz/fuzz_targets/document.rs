#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use punk_core::{EncoderConfig, QuotePolicy, QuoteStyle};
use punk_encoder::generate_document;

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    threshold: u8,
    policy: u8,
    seed: u64,
}

fuzz_target!(|input: Input| {
    let styles = QuoteStyle::ALL.to_vec();
    let quote_policy = match input.policy % 4 {
        0 => QuotePolicy::Only(styles[(input.seed % 3) as usize]),
        1 => QuotePolicy::Cycle(styles),
        2 => QuotePolicy::Random(styles),
        _ => QuotePolicy::Smart(styles),
    };
    let config = EncoderConfig {
        frequency_threshold: input.threshold as usize,
        quote_policy,
        quote_seed: Some(input.seed),
        ..Default::default()
    };

    let doc = generate_document(&input.text, &config).expect("valid config");
    assert_eq!(doc.evaluate().ok().as_deref(), Some(input.text.as_str()));
    assert!(doc.source().is_ascii());
});
