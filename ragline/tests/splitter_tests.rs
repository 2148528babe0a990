//! Determinism, size-bound, and overlap properties of the recursive splitter.

use proptest::prelude::*;
use ragline::chunking::{RecursiveSplitter, TextSplitter};
use ragline::document::Document;
use ragline::error::RagError;

fn doc(text: &str) -> Document {
    Document::new("doc", text, "test")
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn last_chars(text: &str, n: usize) -> String {
    let total = char_len(text);
    text.chars().skip(total.saturating_sub(n)).collect()
}

fn first_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

#[test]
fn construction_rejects_bad_parameters() {
    assert!(matches!(RecursiveSplitter::new(0, 0), Err(RagError::Validation(_))));
    assert!(matches!(RecursiveSplitter::new(10, 10), Err(RagError::Validation(_))));
    assert!(matches!(RecursiveSplitter::new(10, 20), Err(RagError::Validation(_))));
    assert!(RecursiveSplitter::new(10, 9).is_ok());
    assert!(RecursiveSplitter::new(1, 0).is_ok());
}

#[test]
fn empty_input_yields_no_chunks() {
    let splitter = RecursiveSplitter::new(50, 10).unwrap();
    assert!(splitter.split(&doc("")).is_empty());
}

#[test]
fn short_input_yields_single_identical_chunk() {
    let splitter = RecursiveSplitter::new(50, 10).unwrap();
    let chunks = splitter.split(&doc("Aspirin reduces fever."));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "Aspirin reduces fever.");
    assert_eq!(chunks[0].ordinal, 0);
    assert_eq!(chunks[0].id, "doc_0");
}

#[test]
fn input_exactly_chunk_size_stays_whole() {
    let text = "x".repeat(50);
    let splitter = RecursiveSplitter::new(50, 10).unwrap();
    let chunks = splitter.split(&doc(&text));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, text);
}

#[test]
fn drug_label_splits_into_overlapping_chunks() {
    let text = "Aspirin reduces pain and fever. Warnings: avoid in children. \
                Adverse reactions: stomach upset.";
    let splitter = RecursiveSplitter::new(50, 10).unwrap();
    let chunks = splitter.split(&doc(text));

    assert!(chunks.len() >= 2, "expected at least 2 chunks, got {}", chunks.len());
    for chunk in &chunks {
        assert!(char_len(&chunk.text) <= 50, "chunk exceeds size: {:?}", chunk.text);
    }
    for window in chunks.windows(2) {
        assert_eq!(first_chars(&window[1].text, 10), last_chars(&window[0].text, 10));
    }
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.ordinal, i);
        assert_eq!(chunk.id, format!("doc_{i}"));
        assert_eq!(chunk.metadata.get("source_label").map(String::as_str), Some("test"));
    }
}

#[test]
fn splitting_is_deterministic() {
    let text = "First paragraph about dosage.\n\nSecond paragraph about warnings. \
                It has two sentences.\n\nThird paragraph, quite a bit longer, \
                covering adverse reactions in detail.";
    let splitter = RecursiveSplitter::new(40, 8).unwrap();
    let first = splitter.split(&doc(text));
    let second = splitter.split(&doc(text));
    assert_eq!(first, second);
}

#[test]
fn multibyte_text_splits_on_character_boundaries() {
    let text = "Ибупрофен снижает температуру. Αναλγητικό φάρμακο για πόνο. \
                解熱鎮痛薬です。頭痛に効きます。";
    let splitter = RecursiveSplitter::new(20, 5).unwrap();
    let chunks = splitter.split(&doc(text));
    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(char_len(&chunk.text) <= 20);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every chunk respects the size bound, consecutive chunks share the
    /// configured overlap, and stripping the stitched prefixes
    /// reconstructs the original text exactly.
    #[test]
    fn chunk_invariants_hold(
        text in "[a-zA-Z0-9 .!?\n]{0,300}",
        (chunk_size, overlap) in (2usize..60).prop_flat_map(|cs| (Just(cs), 0..cs)),
    ) {
        let splitter = RecursiveSplitter::new(chunk_size, overlap).unwrap();
        let chunks = splitter.split(&doc(&text));

        if text.is_empty() {
            prop_assert!(chunks.is_empty());
            return Ok(());
        }

        let mut reconstructed = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert!(
                char_len(&chunk.text) <= chunk_size,
                "chunk {} has {} chars (max {})",
                i,
                char_len(&chunk.text),
                chunk_size,
            );

            if i == 0 {
                reconstructed.push_str(&chunk.text);
            } else {
                let previous = &chunks[i - 1].text;
                let shared = overlap.min(char_len(previous));
                prop_assert_eq!(
                    first_chars(&chunk.text, shared),
                    last_chars(previous, shared),
                    "chunks {} and {} do not share the overlap", i - 1, i,
                );
                reconstructed.extend(chunk.text.chars().skip(shared));
            }
        }
        prop_assert_eq!(reconstructed, text);
    }

    /// Identical input and parameters always produce identical chunks.
    #[test]
    fn splitting_is_deterministic_for_any_input(
        text in "[a-z .\n]{0,200}",
        (chunk_size, overlap) in (2usize..40).prop_flat_map(|cs| (Just(cs), 0..cs)),
    ) {
        let splitter = RecursiveSplitter::new(chunk_size, overlap).unwrap();
        prop_assert_eq!(splitter.split(&doc(&text)), splitter.split(&doc(&text)));
    }
}
