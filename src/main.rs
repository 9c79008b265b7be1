use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use std::path::Path;
use vocoach::audio::vad::VadConfig;
use vocoach::audio::wav::WavChunkSource;
use vocoach::cli::{Cli, Commands};
use vocoach::config::Config;
use vocoach::interview::test_connection;
use vocoach::providers::{build_dialogue, build_synthesizer, build_transcriber};
use vocoach::streaming::TurnPipeline;
use vocoach::streaming::segmenter::SegmenterConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path)?.with_env_overrides();
    config.validate()?;

    match cli.command {
        Commands::Check => run_check(&config).await,
        Commands::Transcribe { file, verbose } => run_transcribe(&config, &file, verbose).await,
    }
}

/// Handshake each configured provider and report status.
async fn run_check(config: &Config) -> Result<()> {
    let mut failures = 0;

    match check_dialogue(config).await {
        Ok(reply) => println!("LLM status: {} ({})", "ok".green(), reply.trim()),
        Err(e) => {
            failures += 1;
            println!("LLM status: {}: {}", "failed".red(), e);
        }
    }

    match check_synthesis(config).await {
        Ok(bytes) => println!("TTS status: {} ({} bytes)", "ok".green(), bytes),
        Err(e) => {
            failures += 1;
            println!("TTS status: {}: {}", "failed".red(), e);
        }
    }

    match check_transcription(config).await {
        Ok(_) => println!("STT status: {}", "ok".green()),
        Err(e) => {
            failures += 1;
            println!("STT status: {}: {}", "failed".red(), e);
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} provider check(s) failed");
    }
    Ok(())
}

async fn check_dialogue(config: &Config) -> vocoach::Result<String> {
    let model = build_dialogue(&config.llm)?;
    test_connection(model.as_ref()).await
}

async fn check_synthesis(config: &Config) -> vocoach::Result<usize> {
    let synthesizer = build_synthesizer(&config.tts)?;
    let audio = synthesizer.synthesize("Handshake").await?;
    Ok(audio.len())
}

async fn check_transcription(config: &Config) -> vocoach::Result<String> {
    let transcriber = build_transcriber(&config.stt, config.audio.sample_rate)?;
    // One second of silence: enough to exercise the round trip
    let silence = vec![0i16; config.audio.sample_rate as usize];
    transcriber.transcribe(&silence, None).await
}

/// Replay a WAV recording through the streaming pipeline.
async fn run_transcribe(config: &Config, file: &Path, verbose: bool) -> Result<()> {
    let transcriber = build_transcriber(&config.stt, config.audio.sample_rate)?;

    let segmenter = SegmenterConfig {
        sample_rate: config.audio.sample_rate,
        vad: VadConfig {
            frame_ms: config.audio.vad_frame_ms,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut pipeline =
        TurnPipeline::with_configs(transcriber, segmenter, Default::default());

    let mut source = WavChunkSource::from_path(file, config.audio.sample_rate)?;
    while let Some(chunk) = source.next_chunk() {
        if let Some(text) = pipeline.push_chunk(&chunk).await?
            && verbose
        {
            eprintln!("… {text}");
        }
    }

    let transcript = pipeline.finish().await?;
    println!("{transcript}");

    Ok(())
}
