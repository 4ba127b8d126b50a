use crate::error::ScriptError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One caller-supplied script entry, not yet validated.
///
/// Accepts `voice_id` or `speaker_id` for the speaker when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptRecord {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "speaker_id")]
    pub voice_id: Option<String>,
}

impl ScriptRecord {
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            voice_id: Some(voice_id.into()),
        }
    }
}

/// A validated dialogue line: both fields present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    text: String,
    speaker_id: String,
}

impl ScriptLine {
    /// Validates the record found at `index` of a script.
    pub fn parse(index: usize, record: &ScriptRecord) -> Result<Self, ScriptError> {
        let text = required(index, "text", record.text.as_deref())?;
        let speaker_id = required(index, "voice_id", record.voice_id.as_deref())?;
        Ok(Self {
            text: text.to_string(),
            speaker_id: speaker_id.to_string(),
        })
    }
}

fn required<'a>(
    index: usize,
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ScriptError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ScriptError::MissingField { index, field }),
    }
}

/// Provider-facing form of a [`ScriptLine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueInput {
    pub text: String,
    pub voice_id: String,
}

impl From<ScriptLine> for DialogueInput {
    fn from(line: ScriptLine) -> Self {
        Self {
            text: line.text,
            voice_id: line.speaker_id,
        }
    }
}

/// Converts script records into provider inputs, keeping their order.
///
/// Fails on the first record missing `text` or `voice_id`. An empty script
/// yields an empty list.
pub fn translate(script: &[ScriptRecord]) -> Result<Vec<DialogueInput>, ScriptError> {
    script
        .iter()
        .enumerate()
        .map(|(index, record)| ScriptLine::parse(index, record).map(DialogueInput::from))
        .collect()
}

/// Reads a JSON array of `{"text": ..., "voice_id": ...}` records.
pub fn load_script(path: &Path) -> Result<Vec<ScriptRecord>, ScriptError> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<ScriptRecord> = serde_json::from_str(&content)?;
    debug!("Loaded {} script lines from {:?}", records.len(), path);
    Ok(records)
}
