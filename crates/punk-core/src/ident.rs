//! Identifier rules of the target language
//!
//! Used to validate the root variable and to decide when a property key may
//! be written bare instead of quoted.

/// Reserved words (including strict-mode and contextual ones)
pub const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "export", "extends",
    "false", "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private",
    "protected", "public", "return", "static", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Built-in global names a root variable must not shadow
pub const BUILTIN_GLOBALS: &[&str] = &[
    "Array", "ArrayBuffer", "AsyncFunction", "AsyncGenerator",
    "AsyncGeneratorFunction", "Atomics", "BigInt", "BigInt64Array",
    "BigUint64Array", "Boolean", "DataView", "Date", "decodeURI",
    "decodeURIComponent", "encodeURI", "encodeURIComponent", "escape", "eval",
    "exports", "Float32Array", "Float64Array", "Function", "Generator",
    "GeneratorFunction", "globalThis", "Infinity", "Int16Array", "Int32Array",
    "Int8Array", "Intl", "isFinite", "isNaN", "JSON", "Map", "Math", "module",
    "NaN", "Number", "Object", "parseFloat", "parseInt", "Promise", "Proxy",
    "Reflect", "RegExp", "Set", "SharedArrayBuffer", "String", "Symbol", "this",
    "Uint16Array", "Uint32Array", "Uint8Array", "Uint8ClampedArray", "undefined",
    "unescape", "WeakMap", "WeakSet", "WebAssembly",
];

/// True if `s` is an ASCII identifier name (`[A-Za-z_$][A-Za-z0-9_$]*`)
pub fn is_identifier_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[inline]
pub fn is_reserved_word(s: &str) -> bool {
    RESERVED_WORDS.contains(&s)
}

#[inline]
pub fn is_builtin_global(s: &str) -> bool {
    BUILTIN_GLOBALS.contains(&s)
}

/// True if `s` may be used as a bare property key (`{key: ...}`, `R.key`)
#[inline]
pub fn is_bare_key(s: &str) -> bool {
    is_identifier_name(s)
}

/// True if `s` can name a declared variable
pub fn is_bindable(s: &str) -> bool {
    is_identifier_name(s) && !is_reserved_word(s) && !is_builtin_global(s)
}
