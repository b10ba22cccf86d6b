use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChunkingError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Mixed,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Mixed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Mixed => "mixed",
        }
    }

    pub fn preset(self) -> DifficultyPreset {
        use QuestionType::*;

        let (chunk_size, distribution) = match self {
            Self::Easy => (400, vec![(FactRetrieval, 1.0)]),
            Self::Medium => (900, vec![(FactRetrieval, 0.5), (MultiHopReasoning, 0.5)]),
            Self::Hard => (
                1300,
                vec![
                    (MultiHopReasoning, 0.4),
                    (ComparativeAnalysis, 0.3),
                    (ContextualSummarization, 0.3),
                ],
            ),
            Self::Mixed => (
                1000,
                vec![
                    (FactRetrieval, 0.25),
                    (MultiHopReasoning, 0.25),
                    (ComparativeAnalysis, 0.20),
                    (ContextualSummarization, 0.15),
                    (CreativeGeneration, 0.15),
                ],
            ),
        };

        DifficultyPreset {
            difficulty: self,
            chunk_size,
            distribution,
        }
    }
}

impl FromStr for Difficulty {
    type Err = ChunkingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "mixed" => Ok(Self::Mixed),
            _ => Err(ChunkingError::InvalidDifficulty(value.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "Fact Retrieval")]
    FactRetrieval,
    #[serde(rename = "Multi-hop Reasoning")]
    MultiHopReasoning,
    #[serde(rename = "Comparative Analysis")]
    ComparativeAnalysis,
    #[serde(rename = "Contextual Summarization")]
    ContextualSummarization,
    #[serde(rename = "Creative Generation")]
    CreativeGeneration,
}

impl QuestionType {
    pub fn label(self) -> &'static str {
        match self {
            Self::FactRetrieval => "Fact Retrieval",
            Self::MultiHopReasoning => "Multi-hop Reasoning",
            Self::ComparativeAnalysis => "Comparative Analysis",
            Self::ContextualSummarization => "Contextual Summarization",
            Self::CreativeGeneration => "Creative Generation",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Chunk size and question mix for one difficulty level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyPreset {
    pub difficulty: Difficulty,
    pub chunk_size: usize,
    pub distribution: Vec<(QuestionType, f32)>,
}

impl DifficultyPreset {
    pub fn question_types(&self) -> Vec<QuestionType> {
        self.distribution.iter().map(|(kind, _)| *kind).collect()
    }

    pub fn primary_question_type(&self) -> QuestionType {
        self.distribution
            .first()
            .map(|(kind, _)| *kind)
            .unwrap_or(QuestionType::FactRetrieval)
    }

    pub fn with_chunk_size(mut self, chunk_size: Option<usize>) -> Self {
        if let Some(size) = chunk_size {
            self.chunk_size = size;
        }
        self
    }
}
