//! dialogue-synth - multi-speaker text-to-dialogue synthesis client
//!
//! Turns an ordered script of `(text, voice_id)` lines into one synthesized
//! audio clip through a [`backends::DialogueBackend`], and reports failures
//! as a small closed set of [`error::DialogueError`] kinds.

pub mod backends;
pub mod client;
pub mod config_loader;
pub mod error;
pub mod models;
#[cfg(feature = "playback")]
pub mod playback;
pub mod script;
pub mod sink;

pub use backends::elevenlabs::ElevenLabsBackend;
pub use backends::DialogueBackend;
pub use client::DialogueClient;
pub use error::{DialogueError, ProviderError, ScriptError};
pub use models::{DialogueResponse, SynthesisSettings, VoiceSegment};
pub use script::{DialogueInput, ScriptLine, ScriptRecord};
