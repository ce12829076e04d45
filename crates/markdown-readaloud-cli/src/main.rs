//! markdown-readaloud - read Markdown documents aloud, one sentence at a time

mod clips;
mod page;
mod speech;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use markdown_readaloud_config::Config;
use markdown_readaloud_engine::narration::run_blocking;
use markdown_readaloud_engine::{Narrator, ParsedDocument, SpeechOptions, io, parse_markdown};

use clips::{ClipWriter, ConsoleSurface};
use speech::HttpSpeechEngine;

#[derive(Parser)]
#[command(name = "markdown-readaloud")]
#[command(version, about = "Read Markdown documents aloud, one sentence at a time", long_about = None)]
#[command(after_help = "EXAMPLES:
    markdown-readaloud render notes.md --standalone -o notes.html
    markdown-readaloud sentences notes.md
    markdown-readaloud narrate notes.md --from element-004-sent001")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the document as HTML with every sentence in its own span
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print `{html, sentences}` as JSON
        #[arg(long)]
        json: bool,

        /// Wrap the HTML in a complete page with highlight styling
        #[arg(long)]
        standalone: bool,

        /// Colour alternate sentences to check where they were split
        #[arg(long)]
        debug_sentences: bool,

        /// Write to PATH instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// List sentence ids and text in reading order
    Sentences {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Synthesize every sentence, saving one audio clip per sentence
    Narrate {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Sentence id to start from
        #[arg(long, value_name = "ID")]
        from: Option<String>,

        /// Directory for the clips (defaults to `clips_dir` from the config file)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        #[arg(long)]
        voice: Option<String>,

        #[arg(long)]
        speed: Option<f32>,

        /// OpenAI-compatible speech endpoint
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            file,
            json,
            standalone,
            debug_sentences,
            output,
        } => render(&file, json, standalone, debug_sentences, output.as_deref()),
        Command::Sentences { file } => sentences(&file),
        Command::Narrate {
            file,
            from,
            out_dir,
            voice,
            speed,
            endpoint,
        } => {
            let mut config = Config::load_or_default()
                .with_context(|| format!("Loading {}", Config::config_path().display()))?;
            if let Some(voice) = voice {
                config.speech.voice = voice;
            }
            if let Some(speed) = speed {
                config.speech.speed = speed;
            }
            if let Some(endpoint) = endpoint {
                config.speech.endpoint = endpoint;
            }
            if let Some(out_dir) = out_dir {
                config.clips_dir = out_dir;
            }
            narrate(&file, from.as_deref(), &config)
        }
    }
}

fn load_document(path: &Path) -> Result<ParsedDocument> {
    let markdown = io::read_markdown_file(path)?;
    let doc = parse_markdown(&markdown).with_context(|| format!("Parsing {}", path.display()))?;
    log::info!(
        "Parsed {} sentences from {}",
        doc.sentences.len(),
        path.display()
    );
    Ok(doc)
}

fn render(
    path: &Path,
    json: bool,
    standalone: bool,
    debug_sentences: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mut doc = load_document(path)?;

    if debug_sentences {
        doc.html = page::mark_sentence_boundaries(&doc.html);
    }
    if standalone {
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        doc.html = page::standalone_page(&title, &doc.html);
    }

    let rendered = if json {
        serde_json::to_string_pretty(&doc)? + "\n"
    } else {
        doc.html
    };

    match output {
        Some(output) => {
            io::write_file(output, rendered)?;
            log::info!("Wrote {}", output.display());
        }
        None => std::io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

fn sentences(path: &Path) -> Result<()> {
    let doc = load_document(path)?;
    let mut stdout = std::io::stdout().lock();
    for (id, text) in &doc.sentences {
        writeln!(stdout, "{id}\t{}", text.trim())?;
    }
    Ok(())
}

fn narrate(path: &Path, from: Option<&str>, config: &Config) -> Result<()> {
    let doc = load_document(path)?;
    let mut engine = HttpSpeechEngine::from_config(&config.speech)?;
    log::info!(
        "Using speech endpoint {} with voice {}",
        engine.endpoint(),
        config.speech.voice
    );

    let surface = ConsoleSurface::new(doc.sentences.clone(), std::io::stdout());
    let options = SpeechOptions {
        voice: config.speech.voice.clone(),
        speed: config.speech.speed,
    };
    let mut narrator = Narrator::new(
        doc.sentences,
        surface,
        ClipWriter::new(&config.clips_dir),
        options,
    );

    let report = run_blocking(&mut narrator, &mut engine, from)?;

    log::info!(
        "Saved {} clips to {}",
        narrator.audio().written().len(),
        narrator.audio().dir().display()
    );
    if !report.failed.is_empty() {
        log::warn!("Skipped after errors: {}", report.failed.join(", "));
    }
    Ok(())
}
