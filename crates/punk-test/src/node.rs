//! External interpreter round-trip
//!
//! Evaluates documents with `node` inside a fresh `vm` context, so the
//! implicit globals a document assigns never leak between runs. The result
//! is read from `module.exports.result` when the document exports it and
//! from the completion value otherwise, and comes back as JSON.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

use punk_core::{EncoderConfig, PunkError};
use punk_encoder::{generate_document, EmittedDocument};

/// Environment variable naming the interpreter binary
pub const NODE_ENV: &str = "PUNK_NODE";

const RUNNER: &str = r#"
const vm = require('vm');
let src = '';
process.stdin.setEncoding('utf8');
process.stdin.on('data', chunk => src += chunk);
process.stdin.on('end', () => {
  const context = { module: { exports: {} } };
  const completion = vm.runInNewContext(src, context);
  const exported = context.module.exports;
  const result = 'result' in exported ? exported.result : completion;
  process.stdout.write(String(JSON.stringify(result)));
});
"#;

/// Harness errors
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("encoding failed: {0}")]
    Encode(#[from] PunkError),

    #[error("interpreter unavailable: {0}")]
    Unavailable(String),

    #[error("interpreter failed: {0}")]
    Interpreter(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unreadable interpreter output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("round-trip mismatch: expected {expected:?}, got {actual:?}")]
    Mismatch { expected: String, actual: String },
}

/// A `node` binary
#[derive(Debug, Clone)]
pub struct NodeInterpreter {
    program: PathBuf,
}

impl NodeInterpreter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The interpreter named by `PUNK_NODE`, or `node` from the path,
    /// if it runs
    pub fn detect() -> Option<Self> {
        let program = std::env::var_os(NODE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("node"));
        let interpreter = Self::new(program);
        match interpreter.version() {
            Ok(version) => {
                debug!(%version, "interpreter found");
                Some(interpreter)
            }
            Err(_) => None,
        }
    }

    /// `node --version`
    pub fn version(&self) -> Result<String, HarnessError> {
        let output = Command::new(&self.program).arg("--version").output()?;
        if !output.status.success() {
            return Err(HarnessError::Unavailable(self.program.display().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Evaluate a document and return the string it produces
    pub fn evaluate(&self, source: &str) -> Result<String, HarnessError> {
        let mut child = Command::new(&self.program)
            .arg("-e")
            .arg(RUNNER)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes())?;
        }
        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(HarnessError::Interpreter(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        Ok(serde_json::from_slice::<String>(&output.stdout)?)
    }

    /// Generate a document for `input` and evaluate it
    pub fn roundtrip(
        &self,
        input: &str,
        config: &EncoderConfig,
    ) -> Result<EmittedDocument, HarnessError> {
        let doc = generate_document(input, config)?;
        let actual = self.evaluate(doc.source())?;
        if actual != input {
            return Err(HarnessError::Mismatch {
                expected: input.to_string(),
                actual,
            });
        }
        Ok(doc)
    }
}
