//! ElevenLabs text-to-dialogue backend over blocking HTTP.

use super::DialogueBackend;
use crate::config_loader::Settings;
use crate::error::{ProviderError, ValidationDetail};
use crate::models::{DialogueRequest, SynthesisResult};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
const DIALOGUE_PATH: &str = "/v1/text-to-dialogue/with-timestamps";
const XI_API_KEY_HEADER: &str = "xi-api-key";

pub struct ElevenLabsBackend {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ElevenLabsBackend {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        Self::new(
            settings.base_url.clone(),
            settings.api_key.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), DIALOGUE_PATH)
    }
}

impl DialogueBackend for ElevenLabsBackend {
    fn id(&self) -> &'static str {
        "elevenlabs"
    }

    fn synthesize(&self, request: &DialogueRequest) -> Result<SynthesisResult, ProviderError> {
        let url = self.endpoint();
        debug!(
            "POST {} ({} inputs, model {})",
            url,
            request.inputs.len(),
            request.model_id
        );

        let resp = self
            .http
            .post(&url)
            .query(&[("output_format", request.output_format.as_str())])
            .header(XI_API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()?;

        let status = resp.status();
        let body = resp.text()?;

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(ProviderError::Validation {
                detail: parse_validation_detail(&body),
            });
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Deserialize)]
struct ValidationBody {
    #[serde(default)]
    detail: Value,
}

/// Pulls the structured `detail` list out of a 422 body.
///
/// Entries are parsed one at a time and the list stops at the first entry
/// that is not a detail object, so a malformed tail never hides the first
/// entry. Anything that is not a list yields an empty list.
fn parse_validation_detail(body: &str) -> Vec<ValidationDetail> {
    let entries = match serde_json::from_str::<ValidationBody>(body) {
        Ok(ValidationBody {
            detail: Value::Array(entries),
        }) => entries,
        _ => return Vec::new(),
    };

    entries
        .into_iter()
        .map_while(|entry| serde_json::from_value(entry).ok())
        .collect()
}
