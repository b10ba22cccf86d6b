use std::sync::Arc;
use std::time::Instant;

use qaset_core::{
    ChunkCorpus, ChunkStats, ChunkingError, Document, DocumentChunks, SentenceChunker,
};
use qaset_observability::PipelineMetrics;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::source::{DocumentSource, SourceError};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Chunking(#[from] ChunkingError),
}

/// How documents are scheduled. Both produce identical corpora.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    #[default]
    Sequential,
    Parallel,
}

enum DocumentOutcome {
    Chunked(DocumentChunks),
    Failed,
}

impl DocumentOutcome {
    fn stats(&self) -> ChunkStats {
        let mut stats = ChunkStats::default();
        match self {
            Self::Chunked(document) => stats.record(document),
            Self::Failed => stats.record_failure(),
        }
        stats
    }
}

#[derive(Debug, Clone)]
pub struct BatchRunner {
    chunker: SentenceChunker,
    strategy: Strategy,
    metrics: Arc<PipelineMetrics>,
}

impl BatchRunner {
    pub fn new(chunker: SentenceChunker) -> Self {
        Self {
            chunker,
            strategy: Strategy::default(),
            metrics: PipelineMetrics::shared(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<PipelineMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<PipelineMetrics> {
        &self.metrics
    }

    /// Chunks every document of `source` into one flat corpus.
    ///
    /// Documents that fail to read are logged and counted, then skipped.
    /// Configuration errors abort the run.
    #[instrument(
        skip(self, source),
        fields(chunk_size = self.chunker.chunk_size(), strategy = ?self.strategy)
    )]
    pub fn run(&self, source: &dyn DocumentSource) -> Result<ChunkCorpus, BatchError> {
        let ids = source.list()?;
        info!(documents = ids.len(), "chunking documents");

        let corpus = match self.strategy {
            Strategy::Sequential => {
                let mut corpus = ChunkCorpus::new();
                for id in &ids {
                    match self.process(source, id)? {
                        DocumentOutcome::Chunked(document) => corpus.push_document(document),
                        DocumentOutcome::Failed => corpus.push_failure(),
                    }
                }
                corpus
            }
            Strategy::Parallel => {
                let outcomes = ids
                    .par_iter()
                    .map(|id| self.process(source, id))
                    .collect::<Result<Vec<_>, _>>()?;

                let stats = outcomes
                    .par_iter()
                    .map(DocumentOutcome::stats)
                    .reduce(ChunkStats::default, ChunkStats::merge);

                let chunks = outcomes
                    .into_iter()
                    .flat_map(|outcome| match outcome {
                        DocumentOutcome::Chunked(document) => document.chunks,
                        DocumentOutcome::Failed => Vec::new(),
                    })
                    .collect();

                ChunkCorpus { chunks, stats }
            }
        };

        info!(
            documents = corpus.stats.document_count,
            failed = corpus.stats.failed_documents,
            chunks = corpus.stats.chunk_count,
            total_chars = corpus.stats.total_chars,
            "chunking finished"
        );
        Ok(corpus)
    }

    /// Chunks documents that are already in memory, in order.
    pub fn run_documents(&self, documents: &[Document]) -> Result<ChunkCorpus, ChunkingError> {
        let mut corpus = ChunkCorpus::new();
        for document in documents {
            corpus.push_document(self.chunk(document)?);
        }
        Ok(corpus)
    }

    fn process(
        &self,
        source: &dyn DocumentSource,
        id: &str,
    ) -> Result<DocumentOutcome, ChunkingError> {
        match source.read(id) {
            Ok(text) => self
                .chunk(&Document::new(id, text))
                .map(DocumentOutcome::Chunked),
            Err(err) => {
                warn!(document = %id, error = %err, "skipping document");
                self.metrics.inc_failed();
                Ok(DocumentOutcome::Failed)
            }
        }
    }

    fn chunk(&self, document: &Document) -> Result<DocumentChunks, ChunkingError> {
        let started = Instant::now();
        let chunked = self.chunker.chunk_document(document)?;

        self.metrics
            .observe_document(chunked.chunks.len(), chunked.total_chars, started.elapsed());
        info!(
            document = %document.id,
            chunks = chunked.chunks.len(),
            chars = chunked.total_chars,
            "chunked document"
        );
        Ok(chunked)
    }
}
