use crate::error::ChunkingError;
use crate::models::{Document, DocumentChunks};
use crate::normalize::{char_len, normalize_text};
use crate::segment::split_sentences;

/// The overlap budget is always `chunk_size / OVERLAP_DIVISOR`.
pub const OVERLAP_DIVISOR: usize = 4;

/// Greedy sentence packer.
///
/// Sentences are appended to the current chunk while it stays strictly below
/// `chunk_size` characters. On overflow the chunk is emitted and the next one
/// is seeded with the most recent sentences of the emitted chunk that fit in
/// the overlap budget, followed by the overflowing sentence. Sentences are
/// never split, so a chunk may exceed the target by one sentence plus the
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceChunker {
    chunk_size: usize,
    overlap_budget: usize,
}

impl SentenceChunker {
    pub fn new(chunk_size: usize) -> Result<Self, ChunkingError> {
        if chunk_size == 0 {
            return Err(ChunkingError::InvalidChunkSize);
        }

        Ok(Self {
            chunk_size,
            overlap_budget: chunk_size / OVERLAP_DIVISOR,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap_budget(&self) -> usize {
        self.overlap_budget
    }

    /// Normalizes, segments and chunks one document.
    pub fn chunk_document(&self, document: &Document) -> Result<DocumentChunks, ChunkingError> {
        let normalized = normalize_text(&document.text);
        let chunks = self.chunk_text(&normalized)?;

        Ok(DocumentChunks {
            document_id: document.id.clone(),
            chunks,
            total_chars: char_len(&normalized),
        })
    }

    /// Chunks text that has already been normalized.
    pub fn chunk_text(&self, normalized: &str) -> Result<Vec<String>, ChunkingError> {
        self.chunk_sentences(&split_sentences(normalized))
    }

    pub fn chunk_sentences<S: AsRef<str>>(
        &self,
        sentences: &[S],
    ) -> Result<Vec<String>, ChunkingError> {
        if sentences.is_empty() {
            return Ok(Vec::new());
        }
        if self.overlap_budget == 0 {
            return Err(ChunkingError::ZeroOverlapBudget {
                chunk_size: self.chunk_size,
            });
        }

        let mut emitted = Vec::new();
        let mut buffer = ChunkBuffer::default();

        for sentence in sentences {
            let sentence: &str = sentence.as_ref();
            if buffer.len + char_len(sentence) + 1 < self.chunk_size {
                buffer.push(sentence);
                continue;
            }

            // Only an oversized first sentence reaches an empty buffer; it
            // starts a chunk of its own with nothing to overlap.
            if !buffer.is_empty() {
                emitted.push(buffer.emit());
                buffer = buffer.overlap(self.overlap_budget);
            }
            buffer.push(sentence);
        }

        if !buffer.is_empty() {
            emitted.push(buffer.emit());
        }

        Ok(emitted)
    }
}

/// Sentences of the chunk under construction and their joined text. Every
/// sentence in `text` is followed by one space.
#[derive(Debug, Default)]
struct ChunkBuffer<'a> {
    sentences: Vec<&'a str>,
    text: String,
    len: usize,
}

impl<'a> ChunkBuffer<'a> {
    fn push(&mut self, sentence: &'a str) {
        self.text.push_str(sentence);
        self.text.push(' ');
        self.len += char_len(sentence) + 1;
        self.sentences.push(sentence);
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn emit(&self) -> String {
        self.text.trim().to_string()
    }

    /// New buffer holding the longest run of trailing sentences whose joined
    /// text stays under `budget`. Stops at the first sentence that does not
    /// fit, even if an older one would.
    fn overlap(&self, budget: usize) -> ChunkBuffer<'a> {
        let mut overlap_len = 0;
        let mut taken = 0;

        for sentence in self.sentences.iter().rev() {
            let candidate = char_len(sentence) + 1 + overlap_len;
            if candidate >= budget {
                break;
            }
            overlap_len = candidate;
            taken += 1;
        }

        let mut seeded = ChunkBuffer::default();
        for sentence in &self.sentences[self.sentences.len() - taken..] {
            seeded.push(sentence);
        }
        seeded
    }
}
