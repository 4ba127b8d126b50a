//! dialogue-synth - synthesize a multi-speaker script into an audio file

use anyhow::{Context, Result};
use clap::Parser;
use dialogue_synth::config_loader::Settings;
use dialogue_synth::script::{load_script, ScriptRecord};
use dialogue_synth::{sink, DialogueClient, ElevenLabsBackend};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Synthesize a multi-speaker dialogue script with ElevenLabs
#[derive(Parser)]
#[command(name = "dialogue-synth")]
#[command(author = "StarTuz")]
#[command(version)]
#[command(about = "Synthesize a multi-speaker dialogue script into an audio file", long_about = None)]
struct Cli {
    /// JSON script: an array of {"text": ..., "voice_id": ...} objects.
    /// A short built-in demo script is used when omitted.
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Output audio file (defaults to `output_file` from settings)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the voice segments as JSON to this file
    #[arg(long)]
    segments: Option<PathBuf>,

    /// Extra settings file layered over the default ones
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Play the dialogue after writing it
    #[cfg(feature = "playback")]
    #[arg(short, long)]
    play: bool,
}

fn demo_script() -> Vec<ScriptRecord> {
    vec![
        ScriptRecord::new("[meows] I am a cat.", "BIvP0GN1cAtSRTxNHnWS"),
        ScriptRecord::new(
            "[high pitched] Tweet tweet! I am a bird.",
            "kmSVBPu7loj4ayNinwWM",
        ),
    ]
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // A missing .env is fine; settings can come from files or the environment
    dotenvy::dotenv().ok();
    setup_tracing();

    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let backend =
        ElevenLabsBackend::from_settings(&settings).context("Failed to create HTTP client")?;
    let client = DialogueClient::new(backend);

    let script = match &cli.script {
        Some(path) => {
            load_script(path).with_context(|| format!("Failed to load script {:?}", path))?
        }
        None => demo_script(),
    };
    info!("Synthesizing {} dialogue lines", script.len());

    let response = client.get_dialog(&script)?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.output_file));
    let written = sink::write_audio(&response, &output)
        .with_context(|| format!("Failed to write audio to {:?}", output))?;
    println!("{}", written.display());

    if let Some(path) = &cli.segments {
        sink::write_segments(&response.segments, path)
            .with_context(|| format!("Failed to write segments to {:?}", path))?;
    }

    #[cfg(feature = "playback")]
    if cli.play {
        dialogue_synth::playback::play(&response.audio_data).context("Playback failed")?;
    }

    Ok(())
}
