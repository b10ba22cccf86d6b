use std::fs;
use std::path::Path;

use qaset_core::{
    normalize_text, split_sentences, ChunkCorpus, ChunkingError, Difficulty, SentenceChunker,
};
use qaset_ingest::{BatchError, BatchRunner, DirectorySource, SourceError, Strategy};
use qaset_observability::PipelineMetrics;
use tempfile::TempDir;

const MANUAL: &str = "Installation Guide\n\n\
Unpack the unit on a flat surface. Remove every transport lock before powering on!\n\
Connect the supply hose to the inlet valve.   Tighten by hand only.\n\n\
Is the indicator green? Then the pump is primed. If it blinks red, drain the tank\n\
and repeat the priming cycle. Never run the pump dry. Record the serial number in the log.\n\
Contact support when the fault persists after three cycles";

fn write_corpus(root: &Path) {
    fs::write(root.join("01-manual.txt"), MANUAL).unwrap();
    fs::write(root.join("02-empty.md"), "   \n\t\n").unwrap();
    fs::write(root.join("03-notes.md"), "Short note. Nothing else.").unwrap();
    fs::write(root.join("04-broken.txt"), [0xc3, 0x28, 0xa0, 0xa1]).unwrap();
    fs::write(root.join("scan.pdf"), b"%PDF-1.4 binary").unwrap();
}

fn runner(chunk_size: usize) -> BatchRunner {
    BatchRunner::new(SentenceChunker::new(chunk_size).expect("valid chunk size"))
}

#[test]
fn directory_batch_skips_broken_documents_and_counts_everything() {
    let dir = TempDir::new().expect("create tempdir");
    write_corpus(dir.path());

    let metrics = PipelineMetrics::shared();
    let corpus = runner(160)
        .with_metrics(metrics.clone())
        .run(&DirectorySource::new(dir.path()))
        .expect("batch should succeed");

    assert_eq!(corpus.stats.document_count, 4);
    assert_eq!(corpus.stats.failed_documents, 1);
    assert_eq!(corpus.stats.chunk_count, corpus.chunks.len());
    assert_eq!(
        corpus.stats.total_chars,
        normalize_text(MANUAL).chars().count() + "Short note. Nothing else.".len()
    );
    assert_eq!(corpus.chunks.last().unwrap(), "Short note. Nothing else.");

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.documents_total, 4);
    assert_eq!(snapshot.documents_failed_total, 1);
    assert_eq!(snapshot.chunks_total as usize, corpus.chunks.len());
}

#[test]
fn manual_chunks_cover_every_sentence_with_bounded_overlap() {
    let chunker = SentenceChunker::new(160).unwrap();
    let normalized = normalize_text(MANUAL);
    let sentences = split_sentences(&normalized);
    let chunks = chunker.chunk_text(&normalized).unwrap();
    assert!(chunks.len() > 2);

    // Walk the chunks, skipping each overlap prefix and checking the rest
    // continues the sentence sequence exactly.
    let mut cursor = 0;
    for (idx, chunk) in chunks.iter().enumerate() {
        let pieces = split_sentences(chunk);
        let home_start = pieces
            .iter()
            .position(|piece| *piece == sentences[cursor])
            .expect("chunk continues the document");

        if idx == 0 {
            assert_eq!(home_start, 0);
        } else {
            let overlap_len: usize = pieces[..home_start]
                .iter()
                .map(|piece| piece.chars().count() + 1)
                .sum();
            assert!(overlap_len < chunker.overlap_budget());
            assert_eq!(&pieces[..home_start], &sentences[cursor - home_start..cursor]);
        }

        let home = &pieces[home_start..];
        assert_eq!(home, &sentences[cursor..cursor + home.len()]);
        cursor += home.len();
    }
    assert_eq!(cursor, sentences.len());
    assert_eq!(
        chunks.last().unwrap().rsplit(". ").next().unwrap(),
        "Contact support when the fault persists after three cycles"
    );
}

#[test]
fn sequential_and_parallel_runs_write_identical_content() {
    let dir = TempDir::new().unwrap();
    write_corpus(dir.path());
    let source = DirectorySource::new(dir.path());

    let sequential = runner(120).run(&source).unwrap();
    let parallel = runner(120)
        .with_strategy(Strategy::Parallel)
        .run(&source)
        .unwrap();

    assert_eq!(
        serde_json::to_string(&sequential).unwrap(),
        serde_json::to_string(&parallel).unwrap()
    );
}

#[test]
fn difficulty_presets_change_granularity() {
    let long = MANUAL.repeat(6);
    let sizes = [Difficulty::Easy, Difficulty::Hard].map(|level| {
        let chunker = SentenceChunker::new(level.preset().chunk_size).unwrap();
        chunker.chunk_text(&normalize_text(&long)).unwrap().len()
    });
    assert!(sizes[0] > sizes[1]);
}

#[test]
fn oversized_opening_sentence_stands_alone() {
    let opening = format!("{} end.", "word ".repeat(40));
    let text = format!("{opening} Next one. Last one.");
    let chunker = SentenceChunker::new(100).unwrap();
    let chunks = chunker.chunk_text(&normalize_text(&text)).unwrap();

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0], normalize_text(&opening));
    // Nothing from the oversized sentence fits the overlap budget.
    assert_eq!(chunks[1], "Next one. Last one.");
}

#[test]
fn directory_without_text_documents_fails_before_chunking() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("only.pdf"), b"%PDF").unwrap();

    let err = runner(100).run(&DirectorySource::new(dir.path())).unwrap_err();
    assert!(matches!(err, BatchError::Source(SourceError::NoInputFiles(_))));
}

#[test]
fn all_blank_documents_yield_nothing_to_do() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();
    fs::write(dir.path().join("b.txt"), "\n \n").unwrap();

    let corpus: ChunkCorpus = runner(100).run(&DirectorySource::new(dir.path())).unwrap();
    assert_eq!(corpus.stats.document_count, 2);
    assert_eq!(
        corpus.into_nonempty().unwrap_err(),
        ChunkingError::EmptyCorpus { documents: 2 }
    );
}
