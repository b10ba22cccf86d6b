mod batch;
mod source;

pub use batch::{BatchError, BatchRunner, Strategy};
pub use source::{DirectorySource, DocumentSource, MemorySource, SourceError};
