use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use docqa_core::config::Config;
use docqa_core::types::Chunk;
use docqa_ingest::embedding::{ChunkEmbedder, Embedder, EmbeddingCache, GeminiEmbedder};
use docqa_ingest::{ingest, page_breaks_from_markers, MarkdownSource};
use docqa_llm::AnswerGenerator;
use docqa_retrieval::{ChunkRecord, CitationFormatter, InMemoryIndex, RetrievalMerger, VectorIndex};

/// Load a converted markdown file and run the ingestion pipeline.
fn ingest_file(config: &Config, path: &Path) -> Result<Vec<Chunk>> {
    let markdown = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document.md")
        .to_string();

    let breakpoints = page_breaks_from_markers(&markdown);
    let source = MarkdownSource::new(name, markdown, breakpoints);
    let chunks = ingest(&source, &config.chunking)?;
    Ok(chunks)
}

pub async fn chunk(config: &Config, document: &Path, out: Option<&Path>) -> Result<()> {
    let chunks = ingest_file(config, document)?;

    let pages = chunks.iter().map(|c| c.page).max().unwrap_or(1);
    let sections = chunks
        .iter()
        .filter_map(|c| c.header.as_deref())
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    println!(
        "{}: {} chunks, {} sections, {} pages",
        document.display(),
        chunks.len(),
        sections,
        pages
    );

    if let Some(out) = out {
        let mut file = std::fs::File::create(out)
            .with_context(|| format!("failed to create {}", out.display()))?;
        for chunk in &chunks {
            serde_json::to_writer(&mut file, chunk)?;
            writeln!(file)?;
        }
        info!("wrote {} chunks to {}", chunks.len(), out.display());
    }
    Ok(())
}

pub async fn ask(
    config: &Config,
    document: &Path,
    question: &str,
    top_k: Option<usize>,
) -> Result<()> {
    let Some(api_key) = config.embedding.api_key.clone() else {
        bail!("GEMINI_API_KEY not set");
    };

    let chunks = ingest_file(config, document)?;
    if chunks.is_empty() {
        println!("No relevant content found.");
        return Ok(());
    }

    let embedder: Arc<dyn Embedder> = Arc::new(GeminiEmbedder::new(
        api_key,
        config.embedding.model.clone(),
        config.embedding.dimensions,
    ));
    let cache = EmbeddingCache::new(&config.embedding.model, config.embedding.cache_capacity);
    let mut chunk_embedder = ChunkEmbedder::new(embedder, cache, config.embedding.batch_size);

    let vectors = chunk_embedder.embed_chunks(&chunks).await?;
    let records = chunks
        .iter()
        .cloned()
        .zip(vectors)
        .map(|(chunk, embedding)| ChunkRecord { chunk, embedding })
        .collect();
    let index = InMemoryIndex::new();
    index.upsert(records).await?;
    info!(
        "embedded {} chunks (cache hit rate {:.0}%)",
        chunks.len(),
        chunk_embedder.cache().hit_rate() * 100.0
    );

    let query_vector = chunk_embedder.embed_query(question).await?;
    let top_k = top_k.unwrap_or(config.retrieval.top_k);
    let ranked = index.search(&query_vector, top_k).await?;

    let context = RetrievalMerger::new(config.retrieval.context_budget_chars).merge(ranked);
    if context.is_empty() {
        println!("No relevant content found.");
        return Ok(());
    }

    let formatted = CitationFormatter::format(&context);
    let generator = AnswerGenerator::from_config(&config.llm)?;
    let answer = generator.answer(question, &formatted).await?;

    println!("{answer}");
    println!("\nSources:");
    for (i, citation) in context.citations.iter().enumerate() {
        println!(
            "  [{}] {} | {} | p.{}",
            i + 1,
            citation.document,
            citation.header.as_deref().unwrap_or("untitled"),
            citation.page
        );
    }
    Ok(())
}
