use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct PipelineMetrics {
    documents_total: AtomicU64,
    documents_failed_total: AtomicU64,
    chunks_total: AtomicU64,
    chars_total: AtomicU64,
    total_chunking_micros: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub documents_total: u64,
    pub documents_failed_total: u64,
    pub chunks_total: u64,
    pub chars_total: u64,
    pub avg_chunks_per_document: f64,
    pub avg_chunking_millis: f64,
}

impl PipelineMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn observe_document(&self, chunks: usize, chars: usize, elapsed: Duration) {
        self.documents_total.fetch_add(1, Ordering::Relaxed);
        self.chunks_total.fetch_add(chunks as u64, Ordering::Relaxed);
        self.chars_total.fetch_add(chars as u64, Ordering::Relaxed);
        self.total_chunking_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn inc_failed(&self) {
        self.documents_total.fetch_add(1, Ordering::Relaxed);
        self.documents_failed_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let documents = self.documents_total.load(Ordering::Relaxed);
        let failed = self.documents_failed_total.load(Ordering::Relaxed);
        let chunks = self.chunks_total.load(Ordering::Relaxed);
        let micros = self.total_chunking_micros.load(Ordering::Relaxed);
        let chunked = documents.saturating_sub(failed);

        MetricsSnapshot {
            documents_total: documents,
            documents_failed_total: failed,
            chunks_total: chunks,
            chars_total: self.chars_total.load(Ordering::Relaxed),
            avg_chunks_per_document: if chunked == 0 {
                0.0
            } else {
                chunks as f64 / chunked as f64
            },
            avg_chunking_millis: if chunked == 0 {
                0.0
            } else {
                micros as f64 / 1000.0 / chunked as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info,qaset_ingest=info", service_name))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
