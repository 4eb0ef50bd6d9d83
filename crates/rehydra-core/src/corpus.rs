//! Dehydrated and rehydrated corpus models.
//!
//! A *dehydrated* corpus stores only content identifiers: the thread URL
//! and, per dialogue, an ordered chain of post numbers. A *rehydrated*
//! corpus pairs each chain entry with the text recovered from the live
//! thread, or `null` where recovery failed. Neither form ever stores
//! usernames.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Output format tag written into every rehydrated corpus.
pub const FORMAT: &str = "mediavida_dialogue_text_v2_tuples";

/// Source site tag.
pub const SOURCE: &str = "mediavida";

/// Human-readable description of the turn encoding.
pub const TURN_REPRESENTATION: &str = "[speaker_letter, text] (null if missing)";

/// Redistribution notice embedded in every output file.
pub const NOTICE: &str = "This file contains user-generated content retrieved \
                          at runtime from Mediavida. Do not redistribute.";

/// Wire shape of the dehydrated input, before validation.
///
/// Every field is optional here so that missing required fields surface as
/// [`Error::InvalidCorpus`] with a precise message rather than a generic
/// serde failure.
#[derive(Debug, Deserialize)]
struct RawCorpus {
    #[serde(default)]
    thread_url: Option<String>,
    #[serde(default)]
    dialogues: Option<BTreeMap<String, Vec<Value>>>,
    #[serde(default)]
    thread_id: Option<Value>,
    #[serde(default)]
    snapshot_date: Option<String>,
}

/// A validated dehydrated corpus.
///
/// Chain entries are post numbers; entries that were not valid integers in
/// the input are kept as `None` and will rehydrate to `null` turns.
#[derive(Debug, Clone, PartialEq)]
pub struct DehydratedCorpus {
    /// URL of the first page of the source thread.
    pub thread_url: String,
    /// Dialogue id mapped to its ordered chain of post numbers.
    pub dialogues: BTreeMap<String, Vec<Option<i64>>>,
    /// Opaque thread identifier, copied to the output verbatim.
    pub thread_id: Option<Value>,
    /// Snapshot date of the dehydrated corpus, copied verbatim.
    pub snapshot_date: Option<String>,
}

impl DehydratedCorpus {
    /// Parses and validates a dehydrated corpus from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCorpus`] when `thread_url` is missing or
    /// blank, or when `dialogues` is absent. Rehydration is impossible
    /// without either.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawCorpus = serde_json::from_str(json)?;

        let thread_url = match raw.thread_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                return Err(Error::invalid_corpus(
                    "missing 'thread_url' in dehydrated input; rehydration is not possible",
                ));
            }
        };

        let dialogues = raw
            .dialogues
            .ok_or_else(|| Error::invalid_corpus("missing 'dialogues' map in dehydrated input"))?
            .into_iter()
            .map(|(id, chain)| (id, chain.iter().map(post_number).collect()))
            .collect();

        Ok(Self {
            thread_url,
            dialogues,
            thread_id: raw.thread_id,
            snapshot_date: raw.snapshot_date,
        })
    }

    /// Reads and validates a dehydrated corpus from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Total number of turns referenced across all dialogues.
    pub fn total_turns(&self) -> usize {
        self.dialogues.values().map(Vec::len).sum()
    }
}

/// Coerces a JSON chain entry to a post number.
///
/// Accepts integers and integer-valued strings; anything else is treated
/// as an unresolvable reference.
fn post_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A single recovered turn: speaker letter plus normalized text.
///
/// Serializes as a two-element array, e.g. `["A", "hola"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn(pub String, pub String);

/// Per-dialogue recovery statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueStats {
    /// Length of the dialogue's chain in the input.
    pub n_turns: usize,
    /// Number of chain entries that could not be recovered.
    pub n_missing: usize,
}

/// A rehydrated corpus, ready to be written out.
#[derive(Debug, Serialize)]
pub struct RehydratedCorpus {
    /// Output format tag ([`FORMAT`]).
    pub format: String,
    /// Source site tag ([`SOURCE`]).
    pub source: String,
    /// Opaque thread identifier from the input, or `null`.
    pub thread_id: Option<Value>,
    /// URL of the first page of the source thread.
    pub thread_url: String,
    /// Snapshot date from the input, or `null`.
    pub snapshot_date: Option<String>,
    /// Date this corpus was rehydrated, `YYYY-MM-DD`.
    pub rehydrated_at: String,
    /// Description of the turn encoding ([`TURN_REPRESENTATION`]).
    pub turn_representation: String,
    /// Dialogue id mapped to its recovered turns; `null` marks a turn
    /// that was missing or empty after normalization.
    pub dialogues: BTreeMap<String, Vec<Option<Turn>>>,
    /// Per-dialogue recovery statistics, keyed like `dialogues`.
    pub missing: BTreeMap<String, DialogueStats>,
    /// Redistribution notice ([`NOTICE`]).
    pub notice: String,
}

impl RehydratedCorpus {
    /// Writes the corpus as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
