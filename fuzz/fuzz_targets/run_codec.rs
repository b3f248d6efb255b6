#![no_main]

use libfuzzer_sys::fuzz_target;
use punk_codec::{decode_run, encode_run};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the decoder
    if let Ok(encoded) = std::str::from_utf8(data) {
        let _ = decode_run(encoded);
    }

    let text = String::from_utf8_lossy(data);
    let encoded = encode_run(&text);
    assert_eq!(decode_run(&encoded).ok().as_deref(), Some(text.as_ref()));
});
