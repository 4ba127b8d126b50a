use crate::script::DialogueInput;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_ID: &str = "eleven_v3";
pub const DEFAULT_STABILITY: f32 = 0.5;
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3_44100_128";
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// How the provider should normalize text (numbers, abbreviations) before synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextNormalization {
    Auto,
    On,
    Off,
}

/// Reference to a pronunciation dictionary stored with the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronunciationDictionaryLocator {
    pub pronunciation_dictionary_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// Voice tuning parameters sent as the request's `settings` object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub stability: f32,
}

/// Fixed synthesis configuration used for every dialogue request.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisSettings {
    pub model_id: String,
    pub model_settings: ModelSettings,
    pub output_format: String,
    pub language_code: String,
    pub apply_text_normalization: TextNormalization,
    pub pronunciation_dictionary_locators: Vec<PronunciationDictionaryLocator>,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            model_settings: ModelSettings {
                stability: DEFAULT_STABILITY,
            },
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            apply_text_normalization: TextNormalization::Auto,
            pronunciation_dictionary_locators: Vec::new(),
        }
    }
}

/// Everything a backend needs for one synthesis call.
///
/// Serializes to the provider's JSON body. `output_format` travels as a
/// query parameter and is skipped in the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogueRequest {
    pub inputs: Vec<DialogueInput>,
    pub model_id: String,
    pub language_code: String,
    pub settings: ModelSettings,
    pub pronunciation_dictionary_locators: Vec<PronunciationDictionaryLocator>,
    pub apply_text_normalization: TextNormalization,
    #[serde(skip)]
    pub output_format: String,
}

impl DialogueRequest {
    pub fn new(inputs: Vec<DialogueInput>, settings: &SynthesisSettings) -> Self {
        Self {
            inputs,
            model_id: settings.model_id.clone(),
            language_code: settings.language_code.clone(),
            settings: settings.model_settings,
            pronunciation_dictionary_locators: settings.pronunciation_dictionary_locators.clone(),
            apply_text_normalization: settings.apply_text_normalization,
            output_format: settings.output_format.clone(),
        }
    }
}

/// Timing and position of one dialogue line inside the synthesized audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSegment {
    #[serde(rename = "voice_id")]
    pub speaker_id: String,
    pub start_time_seconds: f64,
    pub end_time_seconds: f64,
    pub character_start_index: i64,
    pub character_end_index: i64,
    pub dialogue_input_index: i64,
}

/// Successful provider reply, before the audio is decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    #[serde(rename = "audio_base64", alias = "audio_base_64")]
    pub audio_base64: String,
    #[serde(default)]
    pub voice_segments: Vec<VoiceSegment>,
}

/// Decoded audio plus the provider's voice segments, in provider order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogueResponse {
    pub audio_data: Vec<u8>,
    pub segments: Vec<VoiceSegment>,
}
