#![no_main]

use libfuzzer_sys::fuzz_target;
use punk_codec::{escape_literal, escaped_len, unescape_literal};
use punk_core::QuoteStyle;

fuzz_target!(|text: String| {
    let _ = unescape_literal(&text);

    for style in QuoteStyle::ALL {
        let literal = escape_literal(&text, style);
        assert!(literal.is_ascii());
        assert_eq!(literal.len(), escaped_len(&text, style));
        assert_eq!(unescape_literal(&literal).ok().as_deref(), Some(text.as_str()));
    }
});
