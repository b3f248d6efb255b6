//! Runtime reflection
//!
//! Letters beyond the axiom words are recovered from the string forms of
//! built-in constructors. Those forms belong to the target runtime, so they
//! are supplied by a [`RuntimeReflector`] instead of being hard-wired into
//! the deriver.

use std::fmt;

use punk_codec::QuoteStrategist;

/// Built-in constructors whose string forms are reflected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Construct {
    Array,
    Boolean,
    Function,
    Number,
    Object,
    RegExp,
    String,
}

impl Construct {
    /// Derivation order
    pub const ALL: [Construct; 7] = [
        Construct::Array,
        Construct::Boolean,
        Construct::Function,
        Construct::Number,
        Construct::Object,
        Construct::RegExp,
        Construct::String,
    ];

    /// Global name of the constructor
    pub fn name(self) -> &'static str {
        match self {
            Construct::Array => "Array",
            Construct::Boolean => "Boolean",
            Construct::Function => "Function",
            Construct::Number => "Number",
            Construct::Object => "Object",
            Construct::RegExp => "RegExp",
            Construct::String => "String",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Construct::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Symbol-only expression of an instance; safe to follow with `[..]`
    pub fn instance(self, quotes: &mut QuoteStrategist) -> String {
        match self {
            Construct::Array => "[]".to_string(),
            Construct::Boolean => "(![])".to_string(),
            Construct::Function => "(()=>{})".to_string(),
            Construct::Number => "(~[])".to_string(),
            Construct::Object => "{}".to_string(),
            Construct::RegExp => "/./".to_string(),
            Construct::String => quotes.quote(""),
        }
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of runtime string forms
pub trait RuntimeReflector {
    /// `String(<construct>)` as the target runtime renders it
    fn reflect_string_form(&self, construct: Construct) -> String;
}

/// Native function rendering of V8 (node, chromium)
#[derive(Clone, Copy, Debug, Default)]
pub struct V8Reflector;

impl RuntimeReflector for V8Reflector {
    fn reflect_string_form(&self, construct: Construct) -> String {
        format!("function {}() {{ [native code] }}", construct.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use punk_core::QuotePolicy;

    #[test]
    fn test_v8_string_form() {
        assert_eq!(
            V8Reflector.reflect_string_form(Construct::RegExp),
            "function RegExp() { [native code] }"
        );
    }

    #[test]
    fn test_construct_names() {
        for c in Construct::ALL {
            assert_eq!(Construct::from_name(c.name()), Some(c));
        }
        assert_eq!(Construct::from_name("Symbol"), None);
    }

    #[test]
    fn test_instances_are_symbolic() {
        let mut quotes = QuoteStrategist::new(QuotePolicy::default(), Some(0));
        for c in Construct::ALL {
            assert!(c.instance(&mut quotes).chars().all(|ch| ch.is_ascii_punctuation()));
        }
    }
}
