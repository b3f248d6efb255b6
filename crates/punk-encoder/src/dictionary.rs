//! Frequency dictionary
//!
//! Runs that repeat are defined once and referenced by key:
//!
//! ```text
//! R={...R,<key>:R['.']('<payload>'),...}
//! ```
//!
//! Only compactable runs (words, numbers, controls, other text) that the
//! namespace cannot already express qualify, and only when they occur more
//! often than the threshold. Entries are ranked by frequency (descending),
//! then length (ascending), then text; keys are handed out in that order.

use std::collections::HashMap;

use tracing::{debug, trace};

use punk_codec::{QuoteStrategist, RunCodec};
use punk_core::{KeyGenerator, PunkResult, SymbolKey};

use crate::namespace::{Name, Namespace, Stage, Value};
use crate::tokenizer::Run;

/// One compacted run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub text: String,
    pub frequency: usize,
    pub key: SymbolKey,
    /// Run codec encoding of `text`
    pub payload: String,
}

/// Run text -> key mapping of one document
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
    by_text: HashMap<String, usize>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank qualifying runs and assign keys.
    ///
    /// `resolvable` reports runs the namespace can already express.
    pub fn build<F>(
        runs: &[Run],
        threshold: usize,
        resolvable: F,
        keys: &mut KeyGenerator,
        codec: &RunCodec,
    ) -> PunkResult<Self>
    where
        F: Fn(&Run) -> bool,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for run in runs.iter().filter(|r| r.kind.is_compactable()) {
            if !resolvable(run) {
                *counts.entry(run.text.as_str()).or_default() += 1;
            }
        }

        // (text, frequency, length in UTF-16 code units)
        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .filter(|&(_, frequency)| frequency > threshold)
            .map(|(text, frequency)| (text, frequency, text.encode_utf16().count()))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| a.2.cmp(&b.2))
                .then_with(|| a.0.cmp(b.0))
        });

        let mut dictionary = Dictionary::new();
        for (text, frequency, _) in ranked {
            let key = keys.next_key()?;
            trace!(%key, frequency, text, "dictionary entry");
            dictionary.by_text.insert(text.to_string(), dictionary.entries.len());
            dictionary.entries.push(DictionaryEntry {
                text: text.to_string(),
                frequency,
                key,
                payload: codec.encode(text),
            });
        }

        debug!(entries = dictionary.len(), threshold, "dictionary built");
        Ok(dictionary)
    }

    /// Bind every entry as `<key>: <decoder>('<payload>')`
    pub fn bind_into(&self, ns: &mut Namespace, quotes: &mut QuoteStrategist) -> PunkResult<()> {
        for entry in &self.entries {
            let expression = format!(
                "{}({})",
                ns.slot_of(&Name::Decoder, quotes)?,
                quotes.quote(&entry.payload)
            );
            ns.bind(
                Name::Run(entry.text.clone()),
                entry.key.clone(),
                expression,
                Value::Text(entry.text.clone()),
                Stage::Dictionary,
            )?;
        }
        Ok(())
    }

    pub fn get(&self, text: &str) -> Option<&DictionaryEntry> {
        self.by_text.get(text).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
