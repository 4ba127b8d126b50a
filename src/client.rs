use crate::backends::DialogueBackend;
use crate::error::{
    DialogueError, ProviderError, DECODE_ERROR, UNHANDLED_CLIENT_ERROR, UNSPECIFIED_CLIENT_ERROR,
};
use crate::models::{DialogueRequest, DialogueResponse, SynthesisSettings};
use crate::script::{translate, ScriptRecord};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use tracing::{debug, info, warn};

/// Sends dialogue scripts to a synthesis backend, one request per call.
///
/// The backend is injected; the client holds no per-call state and can be
/// shared between threads when the backend can.
pub struct DialogueClient<B> {
    backend: B,
}

impl<B: DialogueBackend> DialogueClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Synthesizes `script` as one multi-speaker dialogue.
    ///
    /// An invalid script fails before the backend is contacted. An empty
    /// script returns an empty response without contacting the backend.
    pub fn get_dialog(&self, script: &[ScriptRecord]) -> Result<DialogueResponse, DialogueError> {
        let inputs = translate(script)?;
        if inputs.is_empty() {
            warn!("Empty script, skipping {} request", self.backend.id());
            return Ok(DialogueResponse::default());
        }

        let settings = SynthesisSettings::default();
        let request = DialogueRequest::new(inputs, &settings);
        debug!(
            "Requesting dialogue from {}: {} lines",
            self.backend.id(),
            request.inputs.len()
        );

        let result = self
            .backend
            .synthesize(&request)
            .map_err(normalize_provider_error)?;

        let audio_data = decode_audio(&result.audio_base64)?;
        info!(
            "Dialogue synthesized: {} bytes, {} segments",
            audio_data.len(),
            result.voice_segments.len()
        );

        Ok(DialogueResponse {
            audio_data,
            segments: result.voice_segments,
        })
    }
}

/// Standard alphabet with padding, but non-zero unused trailing bits are accepted.
const AUDIO_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decodes the provider's base64 audio payload.
pub fn decode_audio(data: &str) -> Result<Vec<u8>, DialogueError> {
    AUDIO_ENGINE.decode(data).map_err(|e| {
        warn!("Audio payload is not valid base64: {}", e);
        DialogueError::Decode(DECODE_ERROR.to_string())
    })
}

/// Collapses a provider failure into a client error message.
fn normalize_provider_error(err: ProviderError) -> DialogueError {
    warn!("Dialogue request failed: {}", err);
    match err {
        ProviderError::Validation { detail } => match detail.first() {
            Some(first) => {
                DialogueError::Client(format!("API error at {}: {}", first.loc, first.msg))
            }
            None => DialogueError::Client(UNSPECIFIED_CLIENT_ERROR.to_string()),
        },
        _ => DialogueError::Client(UNHANDLED_CLIENT_ERROR.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationDetail;
    use crate::models::SynthesisResult;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeBackend<F> {
        respond: F,
        calls: AtomicUsize,
    }

    impl<F> FakeBackend<F>
    where
        F: Fn(&DialogueRequest) -> Result<SynthesisResult, ProviderError> + Send + Sync,
    {
        fn new(respond: F) -> Self {
            Self {
                respond,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl<F> DialogueBackend for FakeBackend<F>
    where
        F: Fn(&DialogueRequest) -> Result<SynthesisResult, ProviderError> + Send + Sync,
    {
        fn synthesize(&self, request: &DialogueRequest) -> Result<SynthesisResult, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.respond)(request)
        }

        fn id(&self) -> &'static str {
            "fake"
        }
    }

    fn script() -> Vec<ScriptRecord> {
        vec![ScriptRecord::new("Hi", "a"), ScriptRecord::new("Yo", "b")]
    }

    fn audio(b64: &str) -> Result<SynthesisResult, ProviderError> {
        Ok(SynthesisResult {
            audio_base64: b64.to_string(),
            voice_segments: Vec::new(),
        })
    }

    #[test]
    fn test_decodes_audio() {
        let client = DialogueClient::new(FakeBackend::new(|_| audio("aGVsbG8=")));
        let response = client.get_dialog(&script()).unwrap();
        assert_eq!(response.audio_data, b"hello");
    }

    #[test]
    fn test_nonzero_trailing_bits_accepted() {
        assert_eq!(decode_audio("aGVsbG9=").unwrap(), b"hello");
        assert_eq!(decode_audio("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_missing_padding_rejected() {
        assert!(matches!(decode_audio("aGVsbG8"), Err(DialogueError::Decode(_))));
    }

    #[test]
    fn test_malformed_base64() {
        let client = DialogueClient::new(FakeBackend::new(|_| audio("aGVs!bG8=")));
        match client.get_dialog(&script()) {
            Err(DialogueError::Decode(msg)) => assert_eq!(msg, "Error decoding audio to bytes."),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_detail_message() {
        let client = DialogueClient::new(FakeBackend::new(|_| {
            Err(ProviderError::Validation {
                detail: vec![
                    ValidationDetail::new("body.inputs[0].text", "field required"),
                    ValidationDetail::new("body.model_id", "ignored"),
                ],
            })
        }));
        match client.get_dialog(&script()) {
            Err(DialogueError::Client(msg)) => {
                assert_eq!(msg, "API error at body.inputs[0].text: field required")
            }
            other => panic!("expected client error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_without_detail() {
        let client = DialogueClient::new(FakeBackend::new(|_| {
            Err(ProviderError::Validation { detail: Vec::new() })
        }));
        match client.get_dialog(&script()) {
            Err(DialogueError::Client(msg)) => assert_eq!(msg, "Unspecified API client error"),
            other => panic!("expected client error, got {:?}", other),
        }
    }

    #[test]
    fn test_other_failures_are_unhandled() {
        let failures: Vec<fn() -> ProviderError> = vec![
            || ProviderError::Other("operation timed out".to_string()),
            || ProviderError::Status {
                status: 500,
                body: "boom".to_string(),
            },
            || ProviderError::InvalidResponse(serde_json::from_str::<u8>("x").unwrap_err()),
        ];

        for make in failures {
            let client = DialogueClient::new(FakeBackend::new(move |_| Err(make())));
            match client.get_dialog(&script()) {
                Err(DialogueError::Client(msg)) => assert_eq!(msg, "Unhandled API client error"),
                other => panic!("expected client error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_script_skips_backend() {
        let backend = FakeBackend::new(|_| audio("aGVsbG8="));
        let client = DialogueClient::new(backend);
        let mut bad = script();
        bad[1].voice_id = None;

        assert!(matches!(
            client.get_dialog(&bad),
            Err(DialogueError::Script(_))
        ));
        assert_eq!(client.backend().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_script_skips_backend() {
        let client = DialogueClient::new(FakeBackend::new(|_| audio("aGVsbG8=")));
        let response = client.get_dialog(&[]).unwrap();
        assert!(response.audio_data.is_empty());
        assert!(response.segments.is_empty());
        assert_eq!(client.backend().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_one_call_per_request() {
        let client = DialogueClient::new(FakeBackend::new(|_| audio("")));
        client.get_dialog(&script()).unwrap();
        client.get_dialog(&script()).unwrap();
        assert_eq!(client.backend().calls.load(Ordering::SeqCst), 2);
    }
}
