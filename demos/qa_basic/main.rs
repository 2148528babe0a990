//! # QA Basic Demo
//!
//! Demonstrates the core pipeline: ingest documents, then ask questions.
//!
//! Uses `InMemoryVectorStore`, `RecursiveSplitter`, and the deterministic
//! mock capabilities, so it runs with **zero API keys**. The generator is
//! canned; the interesting output is the retrieval: which sources back
//! each answer and with what relevance.
//!
//! Run: `cargo run --example qa_basic`

use std::sync::Arc;

use ragline::mock::{CannedGenerator, HashEmbedder};
use ragline::{Document, InMemoryVectorStore, RagConfig, RagService, RecursiveSplitter};

fn sample_documents() -> Vec<Document> {
    vec![
        Document::new(
            "aspirin",
            "Aspirin is used for temporary relief of minor aches, pain, and fever. \
             Warnings: do not use in children or teenagers recovering from chickenpox \
             or flu-like symptoms. Adverse reactions: stomach upset, heartburn, and in \
             rare cases gastrointestinal bleeding.",
            "drug-labels",
        ),
        Document::new(
            "ibuprofen",
            "Ibuprofen is a nonsteroidal anti-inflammatory drug used to reduce fever \
             and treat pain or inflammation. Warnings: may cause an increased risk of \
             heart attack or stroke with long-term use. Adverse reactions: nausea, \
             dizziness, and stomach pain.",
            "drug-labels",
        ),
        Document::new(
            "acetaminophen",
            "Acetaminophen relieves mild to moderate pain and reduces fever. \
             Warnings: severe liver damage may occur if more than 4000 mg is taken in \
             24 hours or when used with other products containing acetaminophen. \
             Adverse reactions: rash, nausea, and headache.",
            "drug-labels",
        ),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -- 1. Configure the pipeline ----------------------------------------
    // chunk_size=200 keeps chunks small for this demo; overlap=50 shares
    // context between adjacent chunks; top_k=3 returns the three most
    // relevant sources per question.
    let config = RagConfig::builder()
        .chunk_size(200)
        .chunk_overlap(50)
        .top_k(3)
        .build()?;

    // -- 2. Build the service with in-process components -------------------
    let service = RagService::builder()
        .config(config.clone())
        .splitter(Arc::new(RecursiveSplitter::from_config(&config)?))
        .embedder(Arc::new(HashEmbedder::new(64)))
        .store(Arc::new(InMemoryVectorStore::new()))
        .generator(Arc::new(CannedGenerator::new(
            "The listed adverse reactions include stomach upset and nausea.",
        )))
        .build()?;

    service.init().await?;

    // -- 3. Ingest the sample documents ------------------------------------
    let documents = sample_documents();
    println!("Ingesting {} documents...", documents.len());
    let chunks_created = service.ingest(&documents).await?;
    println!("  {chunks_created} chunk(s) indexed");

    // -- 4. Ask questions ---------------------------------------------------
    let questions = [
        "What are the side effects of aspirin?",
        "Which drug carries a liver damage warning?",
    ];

    for question in &questions {
        println!("\nQuestion: \"{question}\"");
        let answer = service.query(question, None).await?;
        println!("Answer: {}", answer.text);
        if let Some(confidence) = answer.confidence {
            println!("Confidence: {confidence:.4}");
        }
        for (i, source) in answer.sources.iter().enumerate() {
            println!("  {}. [relevance={:.4}] {}", i + 1, source.relevance, source.preview);
        }
    }

    // -- 5. Clear and show the empty-collection behavior --------------------
    service.clear().await?;
    let answer = service.query("What are the side effects of aspirin?", None).await?;
    println!("\nAfter clear: {}", answer.text);

    Ok(())
}
