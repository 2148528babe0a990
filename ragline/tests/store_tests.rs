//! In-memory vector store: search ordering, reset semantics, tie-breaks.

use std::collections::HashMap;

use proptest::prelude::*;
use ragline::document::Chunk;
use ragline::error::RagError;
use ragline::inmemory::InMemoryVectorStore;
use ragline::vectorstore::VectorStore;

fn chunk(id: &str, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: format!("text of {id}"),
        ordinal: 0,
        document_id: "doc".to_string(),
        embedding,
        metadata: HashMap::new(),
    }
}

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map("non-zero embedding", |mut v| {
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm < 1e-8 {
            return None;
        }
        for val in &mut v {
            *val /= norm;
        }
        Some(v)
    })
}

fn arb_chunk(dim: usize) -> impl Strategy<Value = Chunk> {
    ("[a-z]{3,8}", arb_normalized_embedding(dim))
        .prop_map(|(id, embedding)| chunk(&id, embedding))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any set of stored chunks, search returns at most
    /// `min(k, stored)` results, ordered by non-increasing score, with
    /// every score inside `[0, 1]`.
    #[test]
    fn search_is_bounded_ordered_and_normalized(
        chunks in proptest::collection::vec(arb_chunk(16), 1..20),
        query in arb_normalized_embedding(16),
        k in 1usize..25,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (results, unique_count) = rt.block_on(async {
            let store = InMemoryVectorStore::new();
            store.create_collection("test", 16).await.unwrap();

            // Deduplicate by id so upsert overwrites do not skew the count.
            let mut deduped: HashMap<String, Chunk> = HashMap::new();
            for c in &chunks {
                deduped.entry(c.id.clone()).or_insert_with(|| c.clone());
            }
            let unique: Vec<Chunk> = deduped.into_values().collect();
            let count = unique.len();

            store.upsert("test", &unique).await.unwrap();
            (store.search("test", &query, k).await.unwrap(), count)
        });

        prop_assert!(results.len() <= k);
        prop_assert!(results.len() <= unique_count);
        for result in &results {
            prop_assert!((0.0..=1.0).contains(&result.score), "score {} out of range", result.score);
        }
        for window in results.windows(2) {
            prop_assert!(
                window[0].score >= window[1].score,
                "results not in descending order: {} < {}",
                window[0].score,
                window[1].score,
            );
        }
    }
}

#[tokio::test]
async fn reset_on_empty_collection_is_noop_success() {
    let store = InMemoryVectorStore::new();
    store.create_collection("docs", 4).await.unwrap();

    store.reset_collection("docs").await.unwrap();
    store.reset_collection("docs").await.unwrap();

    assert_eq!(store.count("docs").await.unwrap(), 0);
    assert!(store.search("docs", &[1.0, 0.0, 0.0, 0.0], 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn reset_discards_everything_but_stays_queryable() {
    let store = InMemoryVectorStore::new();
    store.create_collection("docs", 2).await.unwrap();
    store
        .upsert("docs", &[chunk("a", vec![1.0, 0.0]), chunk("b", vec![0.0, 1.0])])
        .await
        .unwrap();
    assert_eq!(store.count("docs").await.unwrap(), 2);

    store.reset_collection("docs").await.unwrap();

    assert_eq!(store.count("docs").await.unwrap(), 0);
    assert!(store.search("docs", &[1.0, 0.0], 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn reset_creates_missing_collection() {
    let store = InMemoryVectorStore::new();
    store.reset_collection("fresh").await.unwrap();
    assert_eq!(store.count("fresh").await.unwrap(), 0);
}

#[tokio::test]
async fn equal_scores_order_most_recently_inserted_first() {
    let store = InMemoryVectorStore::new();
    store.create_collection("docs", 2).await.unwrap();

    // Identical embeddings give identical scores for any query.
    store.upsert("docs", &[chunk("older", vec![1.0, 0.0])]).await.unwrap();
    store.upsert("docs", &[chunk("newer", vec![1.0, 0.0])]).await.unwrap();

    let results = store.search("docs", &[1.0, 0.0], 2).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].chunk.id, "newer");
    assert_eq!(results[1].chunk.id, "older");
}

#[tokio::test]
async fn search_never_returns_more_than_stored() {
    let store = InMemoryVectorStore::new();
    store.create_collection("docs", 2).await.unwrap();
    store.upsert("docs", &[chunk("only", vec![1.0, 0.0])]).await.unwrap();

    let results = store.search("docs", &[1.0, 0.0], 10).await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn upsert_with_same_id_overwrites() {
    let store = InMemoryVectorStore::new();
    store.create_collection("docs", 2).await.unwrap();
    store.upsert("docs", &[chunk("a", vec![1.0, 0.0])]).await.unwrap();
    store.upsert("docs", &[chunk("a", vec![0.0, 1.0])]).await.unwrap();
    assert_eq!(store.count("docs").await.unwrap(), 1);
}

#[tokio::test]
async fn operations_on_missing_collection_fail() {
    let store = InMemoryVectorStore::new();
    let err = store.search("nope", &[1.0], 1).await.unwrap_err();
    assert!(matches!(err, RagError::ExternalService { .. }));
}
