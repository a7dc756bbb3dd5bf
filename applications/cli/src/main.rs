/// Recite - verse-by-verse recitation player
use anyhow::Context;
use clap::{Parser, Subcommand};
use recite_audio_desktop::DesktopBackend;
use recite_cli::{run_until_idle, AppConfig, CliError};
use recite_core::{AudioUrlScheme, ChapterCatalog, ContentSource, PlaybackItem};
use recite_playback::{PlayOptions, PlaybackController, PlaybackEvent};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "recite")]
#[command(about = "Verse-by-verse recitation player", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./recite.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the audio URL of a verse
    Url {
        /// Chapter number
        chapter: u32,
        /// Verse number within the chapter
        verse: u32,
    },
    /// List chapters with their verse counts
    Chapters,
    /// Play a verse, or the rest of its chapter with --autoplay
    Play {
        /// Chapter number
        chapter: u32,
        /// Verse number within the chapter
        verse: u32,
        /// Continue with the following verses of the chapter
        #[arg(long)]
        autoplay: bool,
        /// Print playback events as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recite=info,recite_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    config.validate()?;

    match cli.command {
        Commands::Url { chapter, verse } => print_url(&config, chapter, verse)?,
        Commands::Chapters => list_chapters(),
        Commands::Play {
            chapter,
            verse,
            autoplay,
            json,
        } => play(config, chapter, verse, autoplay, json)?,
    }

    Ok(())
}

fn catalog_item(chapter: u32, verse: u32) -> Result<PlaybackItem, CliError> {
    let item = PlaybackItem::new(chapter, verse);
    item.validate()?;
    if !ChapterCatalog::new().contains(&item) {
        return Err(CliError::UnknownItem(item));
    }
    Ok(item)
}

fn print_url(config: &AppConfig, chapter: u32, verse: u32) -> anyhow::Result<()> {
    let item = catalog_item(chapter, verse)?;
    let scheme = AudioUrlScheme::new(&config.playback.audio_base_url)?;
    println!("{}", scheme.resolve(&item));
    Ok(())
}

fn list_chapters() {
    for (chapter, verses) in ChapterCatalog::new().chapters() {
        println!("{chapter:>3}  {verses:>3} verses");
    }
}

fn play(config: AppConfig, chapter: u32, verse: u32, autoplay: bool, json: bool) -> anyhow::Result<()> {
    let item = catalog_item(chapter, verse)?;

    let options = if autoplay {
        PlayOptions::autoplay(ChapterCatalog::new().item_count(chapter)?)
    } else {
        PlayOptions::single()
    };

    let (backend, events) = DesktopBackend::new(config.desktop)?;
    let mut controller = PlaybackController::new(config.playback, backend)?;

    tracing::info!(item = %item.key(), autoplay, "Starting playback");
    controller.play(item, options)?;

    let summary = run_until_idle(&mut controller, &events, |event| {
        if json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "Failed to serialize event"),
            }
        }
        log_event(event);
    });

    tracing::info!(
        finished = summary.finished.len(),
        failed = summary.failed.len(),
        "Playback finished"
    );

    if let Some((key, message)) = summary.failed.first() {
        anyhow::bail!("verse {key} could not be played: {message}");
    }
    Ok(())
}

fn log_event(event: &PlaybackEvent) {
    match event {
        PlaybackEvent::ItemStarted { key } => tracing::info!(verse = %key, "Now reciting"),
        PlaybackEvent::AutoplayAdvanced { from, to } => {
            tracing::info!(from = %from, to = %to, "Next verse");
        }
        PlaybackEvent::ItemFailed { key, message } => {
            tracing::warn!(verse = %key, error = %message, "Verse failed");
        }
        other => tracing::debug!(event = other.name(), "Playback event"),
    }
}
