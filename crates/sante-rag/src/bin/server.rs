//! QA server binary
//!
//! Run with: cargo run -p sante-rag --bin sante-rag-server

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sante_rag::config::AppConfig;
use sante_rag::embedding::{EmbeddingProvider, OllamaEmbedder};
use sante_rag::indexing::load_or_build_index;
use sante_rag::server::QaServer;

/// Serve the brochure QA assistant
#[derive(Parser)]
#[command(name = "sante-rag-server", version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sante_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Brochures: {}", config.corpus.brochures_dir.display());
    tracing::info!("  - Index: {}", config.corpus.index_path.display());
    tracing::info!("  - Embedding model: {}", config.embedding.model);
    tracing::info!("  - Embedding dimensions: {}", config.embedding.dimensions);

    let embedder = Arc::new(OllamaEmbedder::new(&config.embedding)?);

    tracing::info!("Checking Ollama at {}...", config.embedding.base_url);
    match embedder.health_check().await {
        Ok(true) => tracing::info!("Ollama is running"),
        _ => {
            tracing::warn!("Ollama not available at {}", config.embedding.base_url);
            tracing::warn!("Please start Ollama:");
            tracing::warn!("  1. Start: ollama serve");
            tracing::warn!("  2. Pull the model: ollama pull {}", config.embedding.model);
        }
    }

    let index = load_or_build_index(&config, embedder.as_ref()).await?;
    tracing::info!(
        "Index ready: {} document(s), {} chunk(s)",
        index.documents().len(),
        index.len()
    );

    let server = QaServer::new(config, embedder, index);

    println!("\nServer starting...");
    println!("  UI:     http://{}/", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/query     - Ask a question");
    println!("  GET  /api/documents - List brochures");
    println!("  POST /api/reindex   - Rebuild the index");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
