//! Health Audio - Spanish/Tagalog healthcare phrase generator
//!
//! Converts phrase lists into one WAV file per line.

use anyhow::Result;
use clap::Parser;
use health_audio::config::{config_path, Config};
use health_audio::error::GenResult;
use health_audio::generator::{plan_from_sources, AudioGenerator};
use health_audio::language::Language;
use health_audio::texts::TextSource;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output directory for audio files
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text file containing Spanish texts (one per line)
    #[arg(long, alias = "sf")]
    spanish_file: Option<PathBuf>,

    /// Text file containing Tagalog texts (one per line)
    #[arg(long, alias = "tf")]
    tagalog_file: Option<PathBuf>,

    /// Spanish texts to convert
    #[arg(long, alias = "st", num_args = 1..)]
    spanish_texts: Option<Vec<String>>,

    /// Tagalog texts to convert
    #[arg(long, alias = "tt", num_args = 1..)]
    tagalog_texts: Option<Vec<String>>,

    /// Languages to generate
    #[arg(short, long, value_enum, num_args = 1.., default_values_t = Language::ALL)]
    languages: Vec<Language>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// TTS engine: piper or espeak
    #[arg(short, long)]
    engine: Option<String>,

    /// Directory holding Piper voice models
    #[arg(long)]
    voices_dir: Option<PathBuf>,

    /// Write the default config (to --config or the user config dir) and exit
    #[arg(long)]
    init_config: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn text_sources(&self) -> BTreeMap<Language, TextSource> {
        BTreeMap::from([
            (
                Language::Spanish,
                TextSource {
                    file: self.spanish_file.clone(),
                    inline: self.spanish_texts.clone(),
                },
            ),
            (
                Language::Tagalog,
                TextSource {
                    file: self.tagalog_file.clone(),
                    inline: self.tagalog_texts.clone(),
                },
            ),
        ])
    }
}

fn resolve_config(args: &Args) -> GenResult<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(engine) = &args.engine {
        config.engine = engine.clone();
    }
    if let Some(voices_dir) = &args.voices_dir {
        config.voices_dir = voices_dir.clone();
    }
    Ok(config)
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run(args: &Args, config: &Config) -> GenResult<()> {
    // Inputs are read before the engine loads so a bad file fails fast
    let plan = plan_from_sources(&args.languages, &args.text_sources())?;

    let generator = AudioGenerator::from_config(config).await?;
    info!("🔊 Using TTS engine '{}'", generator.engine_name());

    let report = generator.execute(plan).await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.summary(generator.output_dir()));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    if args.init_config {
        let path = args.config.clone().unwrap_or_else(config_path);
        Config::default().save_to(&path)?;
        info!("📝 Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Audio generation failed: {}", e);
            std::process::exit(1);
        }
    };

    info!("🎙️ Health Audio v{} starting...", env!("CARGO_PKG_VERSION"));

    match run(&args, &config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Audio generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
