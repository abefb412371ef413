//! Document and chunk types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Supported brochure file types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF brochure
    Pdf,
    /// Plain text brochure
    Txt,
}

impl FileType {
    /// Detect file type from extension; `None` for anything else
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pdf => "PDF",
            Self::Txt => "Texte",
        }
    }
}

/// A brochure that has been loaded into the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Filename (basename, shown in source lists)
    pub filename: String,
    /// Full path the brochure was loaded from
    pub path: PathBuf,
    /// File type
    pub file_type: FileType,
    /// Content hash of the raw extracted text
    pub content_hash: String,
    /// Length of the raw extracted text in characters
    pub raw_chars: usize,
    /// Number of chunks derived from this document
    pub total_chunks: u32,
    /// Indexing timestamp
    pub ingested_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document record
    pub fn new(
        filename: String,
        path: PathBuf,
        file_type: FileType,
        content_hash: String,
        raw_chars: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            path,
            file_type,
            content_hash,
            raw_chars,
            total_chunks: 0,
            ingested_at: chrono::Utc::now(),
        }
    }
}

/// A bounded passage of cleaned brochure text, the unit of retrieval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Parent document ID
    pub document_id: Uuid,
    /// Cleaned text content, non-empty
    pub text: String,
    /// Position within the parent document
    pub chunk_index: u32,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(document_id: Uuid, text: String, chunk_index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            text,
            chunk_index,
        }
    }
}
