use serde::{Deserialize, Serialize};

use crate::error::ChunkingError;
use crate::models::DocumentChunks;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkStats {
    pub document_count: usize,
    pub chunk_count: usize,
    pub total_chars: usize,
    pub failed_documents: usize,
}

impl ChunkStats {
    pub fn record(&mut self, document: &DocumentChunks) {
        self.document_count += 1;
        self.chunk_count += document.chunks.len();
        self.total_chars += document.total_chars;
    }

    /// A failed document is counted but contributes no chunks or characters.
    pub fn record_failure(&mut self) {
        self.document_count += 1;
        self.failed_documents += 1;
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            document_count: self.document_count + other.document_count,
            chunk_count: self.chunk_count + other.chunk_count,
            total_chars: self.total_chars + other.total_chars,
            failed_documents: self.failed_documents + other.failed_documents,
        }
    }
}

/// Flat chunk collection across every document of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkCorpus {
    pub chunks: Vec<String>,
    pub stats: ChunkStats,
}

impl ChunkCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_document(&mut self, document: DocumentChunks) {
        self.stats.record(&document);
        self.chunks.extend(document.chunks);
    }

    pub fn push_failure(&mut self) {
        self.stats.record_failure();
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Turns an empty corpus into [`ChunkingError::EmptyCorpus`].
    pub fn into_nonempty(self) -> Result<Self, ChunkingError> {
        if self.is_empty() {
            return Err(ChunkingError::EmptyCorpus {
                documents: self.stats.document_count,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, chunks: &[&str], total_chars: usize) -> DocumentChunks {
        DocumentChunks {
            document_id: id.to_string(),
            chunks: chunks.iter().map(ToString::to_string).collect(),
            total_chars,
        }
    }

    #[test]
    fn empty_document_counts_without_chunks() {
        let mut corpus = ChunkCorpus::new();
        corpus.push_document(doc("a", &["one.", "two."], 12));
        corpus.push_document(doc("b", &[], 0));

        assert_eq!(corpus.chunks, vec!["one.", "two."]);
        assert_eq!(
            corpus.stats,
            ChunkStats {
                document_count: 2,
                chunk_count: 2,
                total_chars: 12,
                failed_documents: 0,
            }
        );
    }

    #[test]
    fn failures_only_bump_document_counts() {
        let mut corpus = ChunkCorpus::new();
        corpus.push_failure();
        assert_eq!(corpus.stats.document_count, 1);
        assert_eq!(corpus.stats.failed_documents, 1);
        assert_eq!(corpus.stats.chunk_count, 0);
        assert_eq!(corpus.stats.total_chars, 0);
    }

    #[test]
    fn merge_adds_fieldwise() {
        let mut left = ChunkStats::default();
        left.record(&doc("a", &["x."], 2));
        let mut right = ChunkStats::default();
        right.record(&doc("b", &["y.", "z."], 5));
        right.record_failure();

        let merged = left.merge(right);
        assert_eq!(merged.document_count, 3);
        assert_eq!(merged.chunk_count, 3);
        assert_eq!(merged.total_chars, 7);
        assert_eq!(merged.failed_documents, 1);
    }

    #[test]
    fn empty_corpus_is_nothing_to_do() {
        let mut corpus = ChunkCorpus::new();
        corpus.push_document(doc("blank", &[], 0));
        assert_eq!(
            corpus.into_nonempty().unwrap_err(),
            ChunkingError::EmptyCorpus { documents: 1 }
        );
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let value = serde_json::to_value(ChunkCorpus::new()).unwrap();
        let stats = &value["stats"];
        for key in ["document_count", "chunk_count", "total_chars", "failed_documents"] {
            assert!(stats.get(key).is_some(), "missing {key}");
        }
        assert!(value["chunks"].as_array().unwrap().is_empty());
    }
}
