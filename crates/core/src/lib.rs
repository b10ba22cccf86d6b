pub mod chunker;
pub mod dataset;
pub mod error;
pub mod models;
pub mod normalize;
pub mod preset;
pub mod segment;
pub mod stats;

pub use chunker::{SentenceChunker, OVERLAP_DIVISOR};
pub use dataset::{content_path, template_record, QuestionRecord};
pub use error::ChunkingError;
pub use models::{Document, DocumentChunks};
pub use normalize::normalize_text;
pub use preset::{Difficulty, DifficultyPreset, QuestionType};
pub use segment::split_sentences;
pub use stats::{ChunkCorpus, ChunkStats};
