//! Codepoint/Run Codec
//!
//! Encodes arbitrary text into the restricted symbol alphabet:
//! - the text is split into UTF-16 code units (surrogates stay separate)
//! - each unit is written as a positional base-31 numeral, digit `i`
//!   being the symbol at position `i` of the cipher
//! - unit numerals are joined with the separator `,`
//!
//! The decoder macro emitted into documents performs the inverse at
//! runtime: `split(',')`, map every cipher symbol to its base-31 digit,
//! `parseInt(.., 31)`, `String.fromCharCode`, `join('')`.

use punk_core::{Alphabet, PunkError, PunkResult, RUN_SEPARATOR};

/// Text <-> cipher digit string codec
#[derive(Clone, Debug)]
pub struct RunCodec {
    cipher: Alphabet,
    separator: char,
}

impl RunCodec {
    /// Codec over the standard 31-symbol cipher
    pub fn new() -> Self {
        RunCodec {
            cipher: Alphabet::run_cipher(),
            separator: RUN_SEPARATOR,
        }
    }

    /// Codec over a custom cipher; the separator must not be a digit
    pub fn with_cipher(cipher: Alphabet, separator: char) -> PunkResult<Self> {
        if cipher.len() < 2 || cipher.len() > 36 {
            return Err(PunkError::InvalidAlphabet(format!(
                "run cipher needs 2..=36 symbols, got {}",
                cipher.len()
            )));
        }
        if cipher.contains(separator) {
            return Err(PunkError::InvalidAlphabet(format!(
                "separator {:?} is also a cipher digit",
                separator
            )));
        }
        Ok(RunCodec { cipher, separator })
    }

    /// Numeral base (the cipher size)
    #[inline]
    pub fn radix(&self) -> u32 {
        self.cipher.len() as u32
    }

    #[inline]
    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn cipher(&self) -> &Alphabet {
        &self.cipher
    }

    /// Numeral of a single code unit
    pub fn encode_unit(&self, unit: u16) -> String {
        let radix = self.radix();
        let symbols = self.cipher.symbols();
        let mut value = unit as u32;
        let mut digits = Vec::with_capacity(4);
        loop {
            digits.push(symbols[(value % radix) as usize]);
            value /= radix;
            if value == 0 {
                break;
            }
        }
        digits.into_iter().rev().collect()
    }

    /// Parse the numeral of a single code unit
    pub fn decode_unit(&self, numeral: &str) -> PunkResult<u16> {
        if numeral.is_empty() {
            return Err(PunkError::InvalidRunEncoding("empty code unit".into()));
        }

        let mut value: u32 = 0;
        for symbol in numeral.chars() {
            let digit = self.cipher.position(symbol).ok_or_else(|| {
                PunkError::InvalidRunEncoding(format!("{:?} is not a cipher digit", symbol))
            })?;
            value = value * self.radix() + digit as u32;
            if value > u16::MAX as u32 {
                return Err(PunkError::InvalidRunEncoding(format!(
                    "{:?} exceeds a code unit",
                    numeral
                )));
            }
        }
        Ok(value as u16)
    }

    /// Encode `text`; the empty string encodes to the empty string
    pub fn encode(&self, text: &str) -> String {
        let mut out = String::new();
        for (i, unit) in text.encode_utf16().enumerate() {
            if i > 0 {
                out.push(self.separator);
            }
            out.push_str(&self.encode_unit(unit));
        }
        out
    }

    /// Code units of an encoded run
    pub fn decode_units(&self, encoded: &str) -> PunkResult<Vec<u16>> {
        if encoded.is_empty() {
            return Ok(Vec::new());
        }
        encoded
            .split(self.separator)
            .map(|numeral| self.decode_unit(numeral))
            .collect()
    }

    /// Decode an encoded run back into text
    pub fn decode(&self, encoded: &str) -> PunkResult<String> {
        let units = self.decode_units(encoded)?;
        String::from_utf16(&units)
            .map_err(|_| PunkError::InvalidRunEncoding("unpaired surrogate".into()))
    }
}

impl Default for RunCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode `text` with the standard cipher
pub fn encode_run(text: &str) -> String {
    RunCodec::new().encode(text)
}

/// Decode `encoded` with the standard cipher
pub fn decode_run(encoded: &str) -> PunkResult<String> {
    RunCodec::new().decode(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unit_numerals() {
        let codec = RunCodec::new();
        assert_eq!(codec.radix(), 31);
        assert_eq!(codec.encode_unit(0), "_");
        assert_eq!(codec.encode_unit(1), "$");
        assert_eq!(codec.encode_unit(30), "\\");
        assert_eq!(codec.encode_unit(31), "$_");
        // 'a' = 97 = 3 * 31 + 4
        assert_eq!(codec.encode_unit(97), ":;");
        assert_eq!(codec.decode_unit(":;").unwrap(), 97);
        assert_eq!(codec.decode_unit(&codec.encode_unit(u16::MAX)).unwrap(), u16::MAX);
    }

    #[test]
    fn test_encode_text() {
        assert_eq!(encode_run(""), "");
        assert_eq!(encode_run("aa"), ":;,:;");
        assert_eq!(decode_run(":;,:;").unwrap(), "aa");
        assert_eq!(decode_run("").unwrap(), "");
    }

    #[test]
    fn test_surrogates_are_separate_units() {
        let encoded = encode_run("\u{1f600}");
        assert_eq!(encoded.split(',').count(), 2);
        assert_eq!(decode_run(&encoded).unwrap(), "\u{1f600}");
    }

    #[test]
    fn test_output_alphabet() {
        let encoded = encode_run("Hello, World! \u{e9}\u{4e2d}\n");
        assert!(encoded.chars().all(|c| c.is_ascii_punctuation()));
    }

    #[test]
    fn test_decode_errors() {
        let codec = RunCodec::new();
        assert!(codec.decode(",").is_err());
        assert!(codec.decode("a").is_err());
        // 31^4 > u16::MAX
        assert!(codec.decode("$____").is_err());
        // lone high surrogate
        let lone = codec.encode_unit(0xd83d);
        assert!(codec.decode(&lone).is_err());
        assert_eq!(codec.decode_units(&lone).unwrap(), vec![0xd83d]);
    }

    #[test]
    fn test_custom_cipher() {
        let codec = RunCodec::with_cipher(Alphabet::new("01").unwrap(), '|').unwrap();
        assert_eq!(codec.encode("\u{5}"), "101");
        assert!(RunCodec::with_cipher(Alphabet::new("01").unwrap(), '0').is_err());
        assert!(RunCodec::with_cipher(Alphabet::new("0").unwrap(), '|').is_err());
    }

    proptest! {
        #[test]
        fn prop_run_roundtrip(text in any::<String>()) {
            let encoded = encode_run(&text);
            prop_assert!(encoded.chars().all(|c| c.is_ascii_punctuation()));
            prop_assert_eq!(decode_run(&encoded).unwrap(), text);
        }
    }
}
