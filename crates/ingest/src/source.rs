use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

pub const TEXT_EXTENSIONS: [&str; 2] = ["txt", "md"];

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error("no text documents (.txt, .md) found in {0}")]
    NoInputFiles(PathBuf),

    #[error("failed listing input directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed reading {id}: {source}")]
    Read {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("document {0} is not part of this source")]
    UnknownDocument(String),

    #[error("extraction failed for {id}: {reason}")]
    Extraction { id: String, reason: String },
}

/// Supplies pre-extracted document text by identifier.
///
/// `list` fails the whole batch; `read` failures are per document and the
/// batch runner skips them.
pub trait DocumentSource: Send + Sync {
    fn list(&self) -> Result<Vec<String>, SourceError>;
    fn read(&self, id: &str) -> Result<String, SourceError>;
}

#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    recursive: bool,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            recursive: false,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSource for DirectorySource {
    fn list(&self) -> Result<Vec<String>, SourceError> {
        if !self.root.is_dir() {
            return Err(SourceError::MissingDirectory(self.root.clone()));
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut ids = Vec::new();

        for entry in WalkDir::new(&self.root).max_depth(max_depth) {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_text_document(entry.path()) {
                continue;
            }

            let rel_path = entry
                .path()
                .strip_prefix(&self.root)
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|_| entry.path().to_string_lossy().to_string());
            ids.push(rel_path);
        }

        if ids.is_empty() {
            return Err(SourceError::NoInputFiles(self.root.clone()));
        }

        ids.sort();
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<String, SourceError> {
        std::fs::read_to_string(self.root.join(id)).map_err(|source| SourceError::Read {
            id: id.to_string(),
            source,
        })
    }
}

fn is_text_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// In-memory documents, listed in insertion order. Failures can be staged to
/// stand in for documents whose extraction broke upstream.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    order: Vec<String>,
    documents: BTreeMap<String, Result<String, String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(id.into(), Ok(text.into()));
        self
    }

    pub fn with_failure(mut self, id: impl Into<String>, reason: impl Into<String>) -> Self {
        self.insert(id.into(), Err(reason.into()));
        self
    }

    fn insert(&mut self, id: String, entry: Result<String, String>) {
        if self.documents.insert(id.clone(), entry).is_none() {
            self.order.push(id);
        }
    }
}

impl DocumentSource for MemorySource {
    fn list(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.order.clone())
    }

    fn read(&self, id: &str) -> Result<String, SourceError> {
        match self.documents.get(id) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(reason)) => Err(SourceError::Extraction {
                id: id.to_string(),
                reason: reason.clone(),
            }),
            None => Err(SourceError::UnknownDocument(id.to_string())),
        }
    }
}
