//! Brochure ingestion pipeline: load, clean, chunk

mod chunker;
mod cleaner;
mod loader;

pub use chunker::TextChunker;
pub use cleaner::clean;
pub use loader::{load_corpus, LoadedDocument};
