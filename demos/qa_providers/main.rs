//! # QA Providers Demo
//!
//! The same pipeline wired to real capabilities: Jina embeddings and Groq
//! generation.
//!
//! Requires: `JINA_API_KEY` and `GROQ_API_KEY` environment variables.
//!
//! Run: `cargo run --example qa_providers --features providers`

use std::sync::Arc;

use ragline::groq::GroqGenerator;
use ragline::jina::JinaEmbedder;
use ragline::{Document, InMemoryVectorStore, RagConfig, RagService, RecursiveSplitter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // -- 1. Real capabilities from the environment --------------------------
    let embedder = Arc::new(JinaEmbedder::from_env()?);
    let generator = Arc::new(GroqGenerator::from_env()?);

    // -- 2. Build the service ----------------------------------------------
    let config = RagConfig::default();
    let service = RagService::builder()
        .config(config.clone())
        .splitter(Arc::new(RecursiveSplitter::from_config(&config)?))
        .embedder(embedder)
        .store(Arc::new(InMemoryVectorStore::new()))
        .generator(generator)
        .build()?;

    service.init().await?;

    // -- 3. Ingest a small knowledge base -----------------------------------
    let documents = vec![Document::new(
        "aspirin-label",
        "Drug Name: Aspirin\n\n\
         Indications and Usage: for the temporary relief of minor aches, pains, \
         and headache, and to reduce fever.\n\n\
         Warnings: Reye's syndrome - children and teenagers who have or are \
         recovering from chickenpox or flu-like symptoms should not use this \
         product.\n\n\
         Adverse Reactions: stomach upset, heartburn, and in rare cases \
         gastrointestinal bleeding.",
        "drug-labels",
    )];

    let chunks_created = service.ingest(&documents).await?;
    println!("Ingested {chunks_created} chunk(s)");

    // -- 4. Ask --------------------------------------------------------------
    let answer = service.query("What are the side effects of aspirin?", None).await?;

    println!("\nAnswer: {}", answer.text);
    if let Some(confidence) = answer.confidence {
        println!("Confidence: {confidence:.4}");
    }
    println!("Sources:");
    for source in &answer.sources {
        println!("  [relevance={:.4}] {}", source.relevance, source.preview);
    }

    Ok(())
}
