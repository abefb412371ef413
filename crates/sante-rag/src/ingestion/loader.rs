//! Brochure loading from the corpus directory
//!
//! Reads every PDF/TXT file under the configured directory and extracts raw
//! text per document. Unreadable or empty files are skipped with a warning;
//! the load pass always continues.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::{Document, FileType};

/// A brochure with its raw extracted text, before cleaning and chunking
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Document record
    pub document: Document,
    /// Raw extracted text
    pub raw_text: String,
}

/// Load every readable brochure under `dir`, in sorted path order.
///
/// Returns an error only when the directory itself is missing; per-file
/// failures are logged and skipped. An empty directory yields an empty list.
pub fn load_corpus(dir: &Path) -> Result<Vec<LoadedDocument>> {
    if !dir.is_dir() {
        return Err(Error::Config(format!(
            "Brochures directory not found: {}",
            dir.display()
        )));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.into_path();
            let ext = path.extension()?.to_str()?;
            FileType::from_extension(ext).map(|_| path)
        })
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());

    for path in paths {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match load_file(&path, &filename) {
            Ok(loaded) => {
                tracing::info!(
                    "Loaded {} ({} characters)",
                    loaded.document.filename,
                    loaded.raw_text.chars().count()
                );
                documents.push(loaded);
            }
            Err(e) => {
                tracing::warn!("Skipping brochure {}: {}", filename, e);
            }
        }
    }

    Ok(documents)
}

/// Load a single brochure file
fn load_file(path: &Path, filename: &str) -> Result<LoadedDocument> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let file_type = FileType::from_extension(ext)
        .ok_or_else(|| Error::load(filename, format!("unsupported extension '{}'", ext)))?;

    let data =
        std::fs::read(path).map_err(|e| Error::load(filename, format!("read failed: {}", e)))?;

    let raw_text = match file_type {
        FileType::Pdf => extract_pdf_text(&data, filename)?,
        FileType::Txt => String::from_utf8(data)
            .map_err(|e| Error::load(filename, format!("not valid UTF-8: {}", e)))?,
    };

    if raw_text.trim().is_empty() {
        return Err(Error::load(filename, "no text content could be extracted"));
    }

    let raw_chars = raw_text.chars().count();
    let document = Document::new(
        filename.to_string(),
        path.to_path_buf(),
        file_type,
        hash_content(&raw_text),
        raw_chars,
    );

    Ok(LoadedDocument { document, raw_text })
}

/// Extract PDF text with a sync timeout to prevent hangs on problematic fonts
fn extract_pdf_text(data: &[u8], filename: &str) -> Result<String> {
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    let data_vec = data.to_vec();
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let result = pdf_extract::extract_text_from_mem(&data_vec);
        let _ = tx.send(result);
    });

    match rx.recv_timeout(Duration::from_secs(60)) {
        Ok(Ok(text)) => {
            let _ = handle.join();
            Ok(text)
        }
        Ok(Err(e)) => {
            let _ = handle.join();
            tracing::warn!("pdf-extract failed for {}: {}, trying fallback", filename, e);
            extract_pdf_text_fallback(data, filename)
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            tracing::warn!("PDF extraction timeout for {} after 60s", filename);
            extract_pdf_text_fallback(data, filename)
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            tracing::warn!("PDF extraction thread crashed for {}", filename);
            extract_pdf_text_fallback(data, filename)
        }
    }
}

/// Fallback PDF text extraction using lopdf directly
fn extract_pdf_text_fallback(data: &[u8], filename: &str) -> Result<String> {
    let doc = lopdf::Document::load_mem(data)
        .map_err(|e| Error::load(filename, format!("failed to load PDF: {}", e)))?;

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let text = doc
        .extract_text(&page_numbers)
        .map_err(|e| Error::load(filename, format!("failed to extract PDF text: {}", e)))?;

    if text.trim().is_empty() {
        return Err(Error::load(
            filename,
            "PDF appears to be image-based or has no extractable text",
        ));
    }

    Ok(text)
}

/// Hash document content for deduplication and change detection
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
