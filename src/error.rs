use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Message for a provider validation failure that carried no usable detail.
pub const UNSPECIFIED_CLIENT_ERROR: &str = "Unspecified API client error";
/// Message for every provider failure other than a validation failure.
pub const UNHANDLED_CLIENT_ERROR: &str = "Unhandled API client error";
/// Message for an audio payload that is not valid base64.
pub const DECODE_ERROR: &str = "Error decoding audio to bytes.";

/// A script record could not be turned into a dialogue line.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("script line {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The closed set of failures a dialogue request can end in.
///
/// `Client` and `Decode` carry the exact message shown to callers; use
/// `to_string()` (or [`DialogueError::message`]) to read it back.
#[derive(Error, Debug)]
pub enum DialogueError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("{0}")]
    Client(String),
    #[error("{0}")]
    Decode(String),
}

impl DialogueError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Failure reported by a [`crate::backends::DialogueBackend`].
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider refused the request as unprocessable (HTTP 422).
    /// `detail` is empty when the body carried no structured detail list.
    #[error("provider rejected the request ({} detail entries)", .detail.len())]
    Validation { detail: Vec<ValidationDetail> },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// One entry of a provider validation error's `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub loc: Location,
    #[serde(default, deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ValidationDetail {
    pub fn new(loc: impl Into<Location>, msg: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            msg: msg.into(),
            kind: None,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Where in the request a validation error points.
///
/// Providers send either a list of path parts (`["body", "inputs", 0, "text"]`)
/// or a preformatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Path(Vec<LocationPart>),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationPart {
    Index(u64),
    Key(String),
}

impl Default for Location {
    fn default() -> Self {
        Location::Path(Vec::new())
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Location::Raw(raw.to_string())
    }
}

impl From<String> for Location {
    fn from(raw: String) -> Self {
        Location::Raw(raw)
    }
}

impl From<Vec<LocationPart>> for Location {
    fn from(parts: Vec<LocationPart>) -> Self {
        Location::Path(parts)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Raw(raw) => f.write_str(raw),
            Location::Path(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    match part {
                        LocationPart::Index(n) => write!(f, "[{}]", n)?,
                        LocationPart::Key(key) if i == 0 => f.write_str(key)?,
                        LocationPart::Key(key) => write!(f, ".{}", key)?,
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_path_rendering() {
        let detail: ValidationDetail = serde_json::from_str(
            r#"{"loc": ["body", "inputs", 0, "text"], "msg": "field required", "type": "missing"}"#,
        )
        .unwrap();

        assert_eq!(detail.loc.to_string(), "body.inputs[0].text");
        assert_eq!(detail.msg, "field required");
        assert_eq!(detail.kind.as_deref(), Some("missing"));
    }

    #[test]
    fn test_location_raw_string_is_verbatim() {
        let detail: ValidationDetail =
            serde_json::from_str(r#"{"loc": "Error location", "msg": "Error message"}"#).unwrap();
        assert_eq!(detail.loc.to_string(), "Error location");
    }

    #[test]
    fn test_missing_loc_renders_empty() {
        let detail: ValidationDetail = serde_json::from_str(r#"{"msg": "bad"}"#).unwrap();
        assert_eq!(detail.loc.to_string(), "");
    }

    #[test]
    fn test_null_fields_fall_back_to_empty() {
        let detail: ValidationDetail =
            serde_json::from_str(r#"{"loc": null, "msg": null, "type": null}"#).unwrap();
        assert_eq!(detail, ValidationDetail::new(Location::default(), ""));
    }

    #[test]
    fn test_dialogue_error_messages_are_bare() {
        let err = DialogueError::Client(UNHANDLED_CLIENT_ERROR.to_string());
        assert_eq!(err.message(), "Unhandled API client error");

        let err = DialogueError::Decode(DECODE_ERROR.to_string());
        assert_eq!(err.to_string(), "Error decoding audio to bytes.");
    }

    #[test]
    fn test_script_error_names_field() {
        let err = DialogueError::from(ScriptError::MissingField {
            index: 2,
            field: "voice_id",
        });
        assert_eq!(
            err.to_string(),
            "script line 2 is missing required field `voice_id`"
        );
    }
}
