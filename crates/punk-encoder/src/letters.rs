//! Letter and digit deriver
//!
//! Characters are recovered in three waves:
//! - seed: digits from the `++R` counter and letters of the axiom words
//! - constructor letters: letters of reflected constructor string forms,
//!   extracted with `` `${<instance>.constructor}`[i] ``
//! - conversions: `C` and `D` from `escape('<')` / `escape('=')`, `U` from
//!   `{}.toString.call()` and any remaining lowercase letter from
//!   `n.toString(36)`

use tracing::trace;

use punk_codec::QuoteStrategist;
use punk_core::{PunkError, PunkResult, SymbolKey};

use crate::axioms::AxiomTable;
use crate::namespace::{Name, Namespace, Stage, Value};
use crate::reflector::{Construct, RuntimeReflector};

/// Key of a letter, digit or the space
pub fn char_key(c: char) -> PunkResult<SymbolKey> {
    match c {
        ' ' => Ok(SymbolKey::space()),
        '0'..='9' => SymbolKey::digit(c as u8 - b'0').ok_or(PunkError::MissingDerivation(c)),
        _ => SymbolKey::letter(c).ok_or(PunkError::MissingDerivation(c)),
    }
}

fn bind_char(
    ns: &mut Namespace,
    c: char,
    expression: String,
    stage: Stage,
) -> PunkResult<()> {
    trace!(character = ?c, %expression, "derived");
    ns.bind(Name::Char(c), char_key(c)?, expression, Value::Text(c.to_string()), stage)
}

/// Seed entries: digit `d` and every axiom letter found at index `d`,
/// for `d` in `0..=9`. Relies on the root holding `-1` beforehand.
pub fn derive_seed(
    ns: &mut Namespace,
    table: &AxiomTable,
    quotes: &mut QuoteStrategist,
) -> PunkResult<usize> {
    let root = ns.root().to_string();
    let before = ns.len();

    for d in 0..=9u8 {
        let digit = char::from(b'0' + d);
        bind_char(ns, digit, format!("`${{++{}}}`", root), Stage::Seed)?;

        for entry in table.at_index(d as usize) {
            let expression = format!("`${{{}}}`[{}]", entry.axiom.expression(quotes), root);
            bind_char(ns, entry.character, expression, Stage::Seed)?;
        }
    }

    Ok(ns.len() - before)
}

/// Letters of the reflected constructor forms not derived yet
pub fn derive_constructor_letters(
    ns: &mut Namespace,
    reflector: &dyn RuntimeReflector,
    quotes: &mut QuoteStrategist,
) -> PunkResult<usize> {
    let constructor = ns.slot_of(&Name::Ident("constructor".into()), quotes)?;
    let before = ns.len();

    for construct in Construct::ALL {
        let form = reflector.reflect_string_form(construct);
        let mut index = 0;
        for c in form.chars() {
            if c.is_ascii_alphabetic() && !ns.has(&Name::Char(c)) {
                let expression = format!(
                    "`${{{}[{}]}}`[{}]",
                    construct.instance(quotes),
                    constructor,
                    ns.number(index, quotes)?
                );
                bind_char(ns, c, expression, Stage::ConstructorLetters)?;
            }
            index += c.len_utf16();
        }
    }

    Ok(ns.len() - before)
}

/// `C` and `D` from the percent-escapes of `<` and `=`
pub fn derive_escape_letters(ns: &mut Namespace, quotes: &mut QuoteStrategist) -> PunkResult<usize> {
    let before = ns.len();
    for (letter, source) in [('C', "<"), ('D', "=")] {
        if ns.has(&Name::Char(letter)) {
            continue;
        }
        let escape = ns.slot_of(&Name::Ident("escape".into()), quotes)?;
        let expression = format!("{}({})[{}]", escape, quotes.quote(source), ns.number(2, quotes)?);
        bind_char(ns, letter, expression, Stage::Conversions)?;
    }
    Ok(ns.len() - before)
}

/// `U` from `[object Undefined]` and every missing lowercase letter from
/// its base-36 digit
pub fn derive_late_letters(ns: &mut Namespace, quotes: &mut QuoteStrategist) -> PunkResult<usize> {
    let before = ns.len();
    let to_string = Name::Ident("toString".into());

    if !ns.has(&Name::Char('U')) {
        let expression = format!(
            "`${{{{}}[{}][{}]()}}`[{}]",
            ns.slot_of(&to_string, quotes)?,
            ns.slot_of(&Name::Ident("call".into()), quotes)?,
            ns.number(8, quotes)?
        );
        bind_char(ns, 'U', expression, Stage::LateLetters)?;
    }

    for c in 'a'..='z' {
        if ns.has(&Name::Char(c)) {
            continue;
        }
        let value = c.to_digit(36).ok_or(PunkError::MissingDerivation(c))? as usize;
        let expression = format!(
            "(+({}))[{}]({})",
            ns.number(value, quotes)?,
            ns.slot_of(&to_string, quotes)?,
            ns.number(36, quotes)?
        );
        bind_char(ns, c, expression, Stage::LateLetters)?;
    }

    Ok(ns.len() - before)
}
