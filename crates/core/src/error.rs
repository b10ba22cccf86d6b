use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkingError {
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("chunk size {chunk_size} leaves no room for overlap (minimum is 4 characters)")]
    ZeroOverlapBudget { chunk_size: usize },

    #[error("invalid difficulty `{0}` (valid options: easy, medium, hard, mixed)")]
    InvalidDifficulty(String),

    #[error("nothing to do: {documents} document(s) produced no chunks")]
    EmptyCorpus { documents: usize },
}
