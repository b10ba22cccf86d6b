mod prepare;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qaset_core::{Difficulty, Document, SentenceChunker};
use qaset_observability::init_tracing;

use prepare::PrepareOptions;

#[derive(Debug, Parser)]
#[command(name = "qaset")]
#[command(about = "Prepare sentence-aligned chunks for Q&A benchmark datasets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Chunk every text document in a directory and write the content file.
    Prepare {
        input_dir: PathBuf,
        #[arg(long, env = "QASET_OUTPUT", default_value = "benchmark_dataset.json")]
        output: PathBuf,
        #[arg(long, env = "QASET_QUESTIONS", default_value_t = 20)]
        questions: usize,
        #[arg(long, env = "QASET_DIFFICULTY", default_value = "mixed")]
        difficulty: String,
        /// Overrides the difficulty's chunk size.
        #[arg(long, env = "QASET_CHUNK_SIZE")]
        chunk_size: Option<usize>,
        #[arg(long)]
        parallel: bool,
        #[arg(long)]
        recursive: bool,
    },
    /// Chunk a single text file and print the chunks.
    Chunk {
        file: PathBuf,
        #[arg(long, env = "QASET_CHUNK_SIZE", default_value_t = 1000)]
        chunk_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("qaset_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Prepare {
            input_dir,
            output,
            questions,
            difficulty,
            chunk_size,
            parallel,
            recursive,
        } => {
            let difficulty = difficulty
                .parse::<Difficulty>()
                .context("invalid --difficulty value")?;

            let summary = prepare::run(PrepareOptions {
                input_dir,
                output,
                questions,
                preset: difficulty.preset().with_chunk_size(chunk_size),
                parallel,
                recursive,
            })
            .await?;

            prepare::print_report(&summary)?;
        }
        Command::Chunk { file, chunk_size } => {
            let chunker =
                SentenceChunker::new(chunk_size).context("invalid --chunk-size value")?;
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed reading {}", file.display()))?;

            let document = Document::new(file.display().to_string(), text);
            let chunked = chunker.chunk_document(&document)?;
            println!("{}", serde_json::to_string_pretty(&chunked)?);
        }
    }

    Ok(())
}
