#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use googletts_core::config::{resolve_api_key, Env, StdEnv, ENV_GOOGLE_TTS_API_KEY};
use googletts_core::{GoogleTtsClient, CATALOG};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "googletts")]
#[command(about = "Synthesize speech with Google Cloud Text-to-Speech")]
struct Args {
    /// Text to speak
    #[arg(long, required_unless_present = "list_voices")]
    text: Option<String>,

    /// Language code, e.g. en-US
    #[arg(long)]
    lang: Option<String>,

    /// Voice name; requires --lang
    #[arg(long)]
    voice: Option<String>,

    /// Audio encoding, e.g. LINEAR16 or MP3
    #[arg(long)]
    format: Option<String>,

    #[arg(long)]
    sample_rate: Option<u32>,

    #[arg(long)]
    api_key: Option<String>,

    #[arg(long, short, default_value = "speech.wav")]
    output: PathBuf,

    #[arg(long)]
    debug: bool,

    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print supported languages and voices, then exit
    #[arg(long)]
    list_voices: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.debug { "debug" } else { args.log_level.as_str() };
    init_tracing(level)?;

    if args.list_voices {
        for (lang, voices) in CATALOG.iter() {
            println!("{lang}: {}", voices.join(", "));
        }
        return Ok(());
    }

    run(args, &StdEnv).await
}

async fn run(args: Args, env: &impl Env) -> anyhow::Result<()> {
    let api_key = resolve_api_key(args.api_key, ENV_GOOGLE_TTS_API_KEY, env)?
        .with_context(|| format!("an API key is required (--api-key or {ENV_GOOGLE_TTS_API_KEY})"))?;
    let text = args.text.unwrap_or_default();

    let client = GoogleTtsClient::new(api_key, args.debug);
    let audio = client
        .speak(
            &text,
            args.lang.as_deref(),
            args.voice.as_deref(),
            args.format.as_deref(),
            args.sample_rate,
        )
        .await
        .context("speech synthesis failed")?;

    tokio::fs::write(&args.output, &audio)
        .await
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    tracing::info!(
        output = %args.output.display(),
        bytes = audio.len(),
        "audio written"
    );
    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
