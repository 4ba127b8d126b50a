use crate::models::{DialogueResponse, VoiceSegment};
use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the synthesized audio to `path`, replacing any existing file.
pub fn write_audio(response: &DialogueResponse, path: &Path) -> Result<PathBuf> {
    std::fs::write(path, &response.audio_data)?;
    info!("Wrote {} bytes of audio to {:?}", response.audio_data.len(), path);
    Ok(path.to_path_buf())
}

/// Writes the voice segments as a pretty-printed JSON array.
pub fn write_segments(segments: &[VoiceSegment], path: &Path) -> Result<PathBuf> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, segments)?;
    writer.flush()?;
    info!("Wrote {} voice segments to {:?}", segments.len(), path);
    Ok(path.to_path_buf())
}
