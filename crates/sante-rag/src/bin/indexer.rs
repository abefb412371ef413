//! Offline indexing binary
//!
//! Builds the embedding index from the brochure directory and persists it,
//! so the server can start without recomputing embeddings.
//!
//! Run with: cargo run -p sante-rag --bin sante-rag-indexer

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sante_rag::config::AppConfig;
use sante_rag::embedding::{EmbeddingProvider, OllamaEmbedder};
use sante_rag::indexing::build_corpus_index;

/// Build the brochure embedding index
#[derive(Parser)]
#[command(name = "sante-rag-indexer", version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the brochure directory
    #[arg(long)]
    brochures_dir: Option<PathBuf>,

    /// Override the output index path
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sante_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(dir) = args.brochures_dir {
        config.corpus.brochures_dir = dir;
    }
    if let Some(out) = args.out {
        config.corpus.index_path = out;
    }

    tracing::info!("Brochures: {}", config.corpus.brochures_dir.display());
    tracing::info!("Output: {}", config.corpus.index_path.display());

    let embedder = OllamaEmbedder::new(&config.embedding)?;
    if !embedder.health_check().await? {
        anyhow::bail!(
            "Embedding model unavailable at {} - start Ollama and pull '{}' first",
            config.embedding.base_url,
            config.embedding.model
        );
    }

    let index = build_corpus_index(&config, &embedder).await?;
    if index.is_empty() {
        tracing::warn!(
            "No indexable content found in {}",
            config.corpus.brochures_dir.display()
        );
    }

    index.save(&config.corpus.index_path)?;

    println!(
        "Indexed {} document(s) into {} chunk(s) -> {}",
        index.documents().len(),
        index.len(),
        config.corpus.index_path.display()
    );

    Ok(())
}
