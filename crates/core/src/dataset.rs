use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::preset::{Difficulty, DifficultyPreset, QuestionType};

/// One entry of a benchmark dataset, compatible with RAGAs-style evaluators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub evidence: Vec<String>,
    pub evidence_relations: String,
}

/// Placeholder record showing the shape question writers must follow.
pub fn template_record(preset: &DifficultyPreset) -> QuestionRecord {
    QuestionRecord {
        id: record_id(b"example"),
        question: "What is the main topic?".to_string(),
        answer: "The main topic is...".to_string(),
        question_type: preset.primary_question_type(),
        difficulty: preset.difficulty,
        evidence: vec![
            "Evidence passage 1".to_string(),
            "Evidence passage 2".to_string(),
        ],
        evidence_relations: "Evidence 1 provides X, Evidence 2 provides Y".to_string(),
    }
}

/// `doc-` followed by the first ten hex digits of the SHA-256 of `seed`.
pub fn record_id(seed: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(seed));
    format!("doc-{}", &digest[..10])
}

/// Sibling file holding the extracted chunks: `out.json` becomes
/// `out_content.json`; other names get `_content.json` appended.
pub fn content_path(output: &Path) -> PathBuf {
    let is_json = output.extension().and_then(|ext| ext.to_str()) == Some("json");
    let base = if is_json {
        output.with_extension("")
    } else {
        output.to_path_buf()
    };

    let mut name = base
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push("_content.json");
    base.with_file_name(name)
}
