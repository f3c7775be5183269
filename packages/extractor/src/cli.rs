//! Command-line interface for the extractor.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::chunking::{document_to_chunks, ChunkConfig, SentenceSplitter};
use crate::config::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::error::{ExtractorError, Result};
use crate::extractor::extract_document;
use crate::output::{render, save, OutputFormat};
use crate::types::Document;

/// CLIR Extractor - Convert Justice Laws LIMS XML into addressable provisions.
#[derive(Parser)]
#[command(name = "clir-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse one or more act/regulation XML files.
    Extract {
        /// LIMS XML files (e.g., laws-lois-xml/eng/acts/A-1.xml)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Language code (default: grandparent directory of each file)
        #[arg(short, long)]
        lang: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output only the flattened provision list
        #[arg(long)]
        flat: bool,

        /// Output directory (default: print to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split a file's provisions into chunks, printed as JSON lines.
    Chunk {
        /// LIMS XML file
        file: PathBuf,

        /// Language code (default: grandparent directory of the file)
        #[arg(short, long)]
        lang: Option<String>,

        /// Maximum tokens per chunk (at least 50)
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Tokens shared between consecutive chunks
        #[arg(long, default_value_t = DEFAULT_CHUNK_OVERLAP)]
        chunk_overlap: usize,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            files,
            lang,
            format,
            flat,
            output,
        } => extract_command(&files, lang.as_deref(), format, flat, output.as_deref()),
        Commands::Chunk {
            file,
            lang,
            chunk_size,
            chunk_overlap,
        } => chunk_command(&file, lang.as_deref(), chunk_size, chunk_overlap),
    }
}

/// Execute the extract command.
fn extract_command(
    files: &[PathBuf],
    lang: Option<&str>,
    format: OutputFormat,
    flat: bool,
    output: Option<&Path>,
) -> Result<()> {
    let Some(output_dir) = output else {
        let mut stdout = io::stdout().lock();
        for file in files {
            let document = extract_document(file, lang)?;
            stdout.write_all(render_output(&document, format, flat)?.as_bytes())?;
        }
        return Ok(());
    };

    if output_dir.exists() && !output_dir.is_dir() {
        return Err(ExtractorError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Output path is not a directory: {}", output_dir.display()),
        )));
    }

    let pb = ProgressBar::new(files.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    for file in files {
        pb.set_message(file.display().to_string());
        let saved = extract_document(file, lang).and_then(|document| {
            let path = if flat {
                save(
                    &document.all_chunkable_sections,
                    &document.doc_id,
                    output_dir,
                    format,
                )?
            } else {
                save(&document, &document.doc_id, output_dir, format)?
            };
            Ok((document, path))
        });

        let (document, path) = match saved {
            Ok(saved) => saved,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        pb.println(format!(
            "{} {} ({} provisions) -> {}",
            style("Saved").green().bold(),
            style(&document.doc_id).cyan(),
            document.all_chunkable_sections.len(),
            path.display()
        ));
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(())
}

fn render_output(document: &Document, format: OutputFormat, flat: bool) -> Result<String> {
    if flat {
        render(&document.all_chunkable_sections, format)
    } else {
        render(document, format)
    }
}

/// Execute the chunk command.
fn chunk_command(
    file: &Path,
    lang: Option<&str>,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Result<()> {
    // Fail on a bad configuration before reading the file
    let config = ChunkConfig::new(chunk_size, chunk_overlap)?;
    let document = extract_document(file, lang)?;
    let chunks = document_to_chunks(&document, &SentenceSplitter::from_config(&config));

    let mut stdout = io::stdout().lock();
    for chunk in &chunks {
        let line = serde_json::to_string(chunk)?;
        writeln!(stdout, "{line}")?;
    }

    eprintln!(
        "{} {}",
        style("Chunked").bold(),
        style(document.title_str.as_deref().unwrap_or(&document.doc_id)).cyan()
    );
    eprintln!("  Provisions: {}", document.all_chunkable_sections.len());
    eprintln!("  Chunks: {}", style(chunks.len()).green());
    eprintln!(
        "  Chunk size: {} (overlap {})",
        config.chunk_size(),
        config.chunk_overlap()
    );

    Ok(())
}
