use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use qaset_core::{
    content_path, template_record, ChunkCorpus, ChunkStats, DifficultyPreset, QuestionRecord,
    QuestionType, SentenceChunker,
};
use qaset_ingest::{BatchRunner, DirectorySource, Strategy};
use qaset_observability::{MetricsSnapshot, PipelineMetrics};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct PrepareOptions {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub questions: usize,
    pub preset: DifficultyPreset,
    pub parallel: bool,
    pub recursive: bool,
}

#[derive(Debug, Serialize)]
pub struct PreparationSummary {
    pub difficulty: String,
    pub chunk_size: usize,
    pub overlap_budget: usize,
    pub questions_requested: usize,
    pub question_types: Vec<QuestionType>,
    pub content_file: PathBuf,
    pub output_file: PathBuf,
    pub stats: ChunkStats,
    pub metrics: MetricsSnapshot,
    pub elapsed_secs: f64,
    pub prepared_at: DateTime<Utc>,
    #[serde(skip)]
    pub template: QuestionRecord,
}

pub async fn run(options: PrepareOptions) -> Result<PreparationSummary> {
    let started = Instant::now();
    let preset = options.preset;

    let chunker = SentenceChunker::new(preset.chunk_size).context("invalid chunk size")?;
    let strategy = if options.parallel {
        Strategy::Parallel
    } else {
        Strategy::Sequential
    };
    let metrics = PipelineMetrics::shared();
    let runner = BatchRunner::new(chunker)
        .with_strategy(strategy)
        .with_metrics(metrics.clone());
    let source = DirectorySource::new(&options.input_dir).recursive(options.recursive);

    let corpus = tokio::task::spawn_blocking(move || runner.run(&source))
        .await
        .context("chunking task failed")?
        .with_context(|| {
            format!(
                "failed preparing documents from {}",
                options.input_dir.display()
            )
        })?
        .into_nonempty()
        .context("no documents loaded")?;

    let content_file = content_path(&options.output);
    write_content(&content_file, &corpus).await?;

    Ok(PreparationSummary {
        difficulty: preset.difficulty.to_string(),
        chunk_size: chunker.chunk_size(),
        overlap_budget: chunker.overlap_budget(),
        questions_requested: options.questions,
        question_types: preset.question_types(),
        content_file,
        output_file: options.output,
        stats: corpus.stats,
        metrics: metrics.snapshot(),
        elapsed_secs: started.elapsed().as_secs_f64(),
        prepared_at: Utc::now(),
        template: template_record(&preset),
    })
}

async fn write_content(path: &Path, corpus: &ChunkCorpus) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed creating {}", parent.display()))?;
    }

    let body = serde_json::to_vec_pretty(corpus)?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("failed writing content file {}", path.display()))
}

pub fn print_report(summary: &PreparationSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);

    let question_types = summary
        .question_types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    println!();
    println!("Question generation is a manual step.");
    println!("Question types: {question_types}");
    println!("Next steps:");
    println!(
        "1. Review extracted content in: {}",
        summary.content_file.display()
    );
    println!("2. Generate questions from the content with an LLM session or by hand");
    println!("3. Follow the difficulty guidelines:");
    println!("   - Easy: single-passage, direct facts");
    println!("   - Medium: 2-3 hop reasoning");
    println!("   - Hard: cross-document synthesis");
    println!("4. Save questions to: {}", summary.output_file.display());
    println!();
    println!("Template for {}:", summary.output_file.display());
    println!(
        "{}",
        serde_json::to_string_pretty(std::slice::from_ref(&summary.template))?
    );

    Ok(())
}
