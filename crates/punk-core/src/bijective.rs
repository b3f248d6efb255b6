//! Bijective base-N numerals
//!
//! A bijective numeral has no zero digit: the symbol at position `i` of the
//! alphabet has the place value `i + 1`. Every positive integer has exactly
//! one representation and no representation has a leading "zero", so the
//! sequence `1, 2, 3, ...` enumerates every non-empty string over the
//! alphabet, shortest first. Zero encodes to the empty string.
//!
//! Values are arbitrary precision ([`BigUint`]); [`encode_bijective_u64`] is
//! the allocation-light path used by the key generator.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::{Alphabet, PunkError, PunkResult};

/// Encode `n` as a bijective numeral over `alphabet`
pub fn encode_bijective(n: &BigUint, alphabet: &Alphabet) -> String {
    let base = BigUint::from(alphabet.len());
    let mut n = n.clone();
    let mut digits = Vec::new();

    while !n.is_zero() {
        n -= 1u32;
        let digit = (&n % &base).to_usize().unwrap_or_default();
        digits.push(alphabet.symbols()[digit]);
        n /= &base;
    }

    digits.into_iter().rev().collect()
}

/// Encode a machine-sized `n` as a bijective numeral over `alphabet`
pub fn encode_bijective_u64(mut n: u64, alphabet: &Alphabet) -> String {
    let base = alphabet.len() as u64;
    let mut digits = Vec::new();

    while n > 0 {
        n -= 1;
        digits.push(alphabet.symbols()[(n % base) as usize]);
        n /= base;
    }

    digits.into_iter().rev().collect()
}

/// Decode a bijective numeral over `alphabet`
pub fn decode_bijective(numeral: &str, alphabet: &Alphabet) -> PunkResult<BigUint> {
    let base = BigUint::from(alphabet.len());
    let mut value = BigUint::zero();

    for symbol in numeral.chars() {
        let position = alphabet
            .position(symbol)
            .ok_or_else(|| PunkError::InvalidNumeral {
                numeral: numeral.to_string(),
                symbol,
            })?;
        value = value * &base + BigUint::from(position + 1);
    }

    Ok(value)
}

/// Number of digits of the bijective numeral for `n`
pub fn bijective_len(mut n: u64, base: u64) -> usize {
    let mut len = 0;
    while n > 0 {
        n = (n - 1) / base;
        len += 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KEY_ALPHABET, SYMBOLS};
    use proptest::prelude::*;

    fn abc() -> Alphabet {
        Alphabet::new("abc").unwrap()
    }

    #[test]
    fn test_zero_is_empty() {
        assert_eq!(encode_bijective(&BigUint::zero(), &abc()), "");
        assert_eq!(encode_bijective_u64(0, &abc()), "");
        assert_eq!(decode_bijective("", &abc()).unwrap(), BigUint::zero());
    }

    #[test]
    fn test_small_sequence() {
        let a = abc();
        let seq: Vec<String> = (1..=13).map(|n| encode_bijective_u64(n, &a)).collect();
        assert_eq!(
            seq,
            vec![
                "a", "b", "c", "aa", "ab", "ac", "ba", "bb", "bc", "ca", "cb", "cc", "aaa"
            ]
        );
    }

    #[test]
    fn test_spreadsheet_columns() {
        let a = Alphabet::new("ABCDEFGHIJKLMNOPQRSTUVWXYZ").unwrap();
        assert_eq!(encode_bijective_u64(26, &a), "Z");
        assert_eq!(encode_bijective_u64(27, &a), "AA");
        assert_eq!(encode_bijective_u64(702, &a), "ZZ");
        assert_eq!(encode_bijective_u64(703, &a), "AAA");
        assert_eq!(decode_bijective("AZ", &a).unwrap(), BigUint::from(52u32));
    }

    #[test]
    fn test_unary_alphabet() {
        let a = Alphabet::new("|").unwrap();
        assert_eq!(encode_bijective_u64(4, &a), "||||");
        assert_eq!(decode_bijective("|||", &a).unwrap(), BigUint::from(3u32));
    }

    #[test]
    fn test_beyond_u64() {
        let a = Alphabet::keys();
        let n = BigUint::from(u64::MAX) * BigUint::from(u64::MAX) + 12345u32;
        let encoded = encode_bijective(&n, &a);
        assert_eq!(decode_bijective(&encoded, &a).unwrap(), n);
    }

    #[test]
    fn test_invalid_symbol() {
        let err = decode_bijective("abz", &abc()).unwrap_err();
        assert_eq!(
            err,
            PunkError::InvalidNumeral {
                numeral: "abz".into(),
                symbol: 'z'
            }
        );
    }

    #[test]
    fn test_length_grows_at_boundaries() {
        let a = Alphabet::keys();
        let base = a.len() as u64;
        assert_eq!(encode_bijective_u64(base, &a).chars().count(), 1);
        assert_eq!(encode_bijective_u64(base + 1, &a).chars().count(), 2);
        assert_eq!(encode_bijective_u64(base * base + base, &a).chars().count(), 2);
        assert_eq!(encode_bijective_u64(base * base + base + 1, &a).chars().count(), 3);
        assert_eq!(bijective_len(base * base + base + 1, base), 3);
    }

    fn alphabet_strategy() -> impl Strategy<Value = Alphabet> {
        proptest::sample::subsequence(SYMBOLS.chars().collect::<Vec<_>>(), 2..=32)
            .prop_shuffle()
            .prop_map(|chars| Alphabet::new(&chars.into_iter().collect::<String>()).unwrap())
    }

    proptest! {
        #[test]
        fn prop_u64_roundtrip(n in 1u64..u64::MAX, a in alphabet_strategy()) {
            let encoded = encode_bijective_u64(n, &a);
            prop_assert!(encoded.chars().all(|c| a.contains(c)));
            prop_assert_eq!(decode_bijective(&encoded, &a).unwrap(), BigUint::from(n));
            prop_assert_eq!(encoded.chars().count(), bijective_len(n, a.len() as u64));
        }

        #[test]
        fn prop_bigint_roundtrip(limbs in proptest::collection::vec(any::<u32>(), 1..8)) {
            let a = Alphabet::new(KEY_ALPHABET).unwrap();
            let n = BigUint::new(limbs);
            let encoded = encode_bijective(&n, &a);
            prop_assert_eq!(decode_bijective(&encoded, &a).unwrap(), n);
        }

        #[test]
        fn prop_paths_agree(n in 0u64..1_000_000) {
            let a = Alphabet::keys();
            prop_assert_eq!(encode_bijective(&BigUint::from(n), &a), encode_bijective_u64(n, &a));
        }

        #[test]
        fn prop_monotonic_length(n in 1u64..10_000_000) {
            let a = Alphabet::keys();
            let here = encode_bijective_u64(n, &a).len();
            let next = encode_bijective_u64(n + 1, &a).len();
            prop_assert!(next == here || next == here + 1);
        }
    }
}
