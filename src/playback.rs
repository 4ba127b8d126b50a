use rodio::{Decoder, OutputStream, Sink};
use std::io::Cursor;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("failed to decode audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("no audio output device found: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("failed to create sink: {0}")]
    Play(#[from] rodio::PlayError),
}

/// Plays encoded audio (mp3, wav, ...) on the default output device and
/// blocks until it finishes.
pub fn play(audio: &[u8]) -> Result<(), PlaybackError> {
    // Decode first so bad payloads fail without touching the device
    let source = Decoder::new(Cursor::new(audio.to_vec()))?;

    // Stream handle must outlive the sink
    let (_stream, stream_handle) = OutputStream::try_default()?;
    let sink = Sink::try_new(&stream_handle)?;

    info!("Playing {} bytes of audio", audio.len());
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}
