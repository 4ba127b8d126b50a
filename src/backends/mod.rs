pub mod elevenlabs;

use crate::error::ProviderError;
use crate::models::{DialogueRequest, SynthesisResult};
use std::sync::Arc;

/// Trait that every dialogue synthesis provider must implement.
/// The client only ever talks to a provider through this, so tests can swap in a fake.
pub trait DialogueBackend: Send + Sync {
    /// Performs one blocking synthesis call. No retries.
    fn synthesize(&self, request: &DialogueRequest) -> Result<SynthesisResult, ProviderError>;

    /// Returns the unique ID of the backend (e.g., "elevenlabs")
    fn id(&self) -> &'static str;
}

impl<T: DialogueBackend + ?Sized> DialogueBackend for Arc<T> {
    fn synthesize(&self, request: &DialogueRequest) -> Result<SynthesisResult, ProviderError> {
        (**self).synthesize(request)
    }

    fn id(&self) -> &'static str {
        (**self).id()
    }
}

impl<T: DialogueBackend + ?Sized> DialogueBackend for Box<T> {
    fn synthesize(&self, request: &DialogueRequest) -> Result<SynthesisResult, ProviderError> {
        (**self).synthesize(request)
    }

    fn id(&self) -> &'static str {
        (**self).id()
    }
}
