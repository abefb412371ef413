//! Sentence-bounded text chunking
//!
//! Splits cleaned brochure text into retrieval-sized passages. Chunks never
//! overlap and no content is dropped: the whitespace-normalized concatenation
//! of the chunks reconstructs the whitespace-normalized input.

use unicode_segmentation::UnicodeSegmentation;

use crate::config::ChunkingConfig;

/// Text chunker with configurable size bounds
pub struct TextChunker {
    /// Maximum chunk size in characters
    max_chars: usize,
    /// Minimum chunk size; a shorter trailing fragment is merged backwards
    /// when it fits, otherwise kept as its own chunk
    min_chars: usize,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(max_chars: usize, min_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
            min_chars,
        }
    }

    /// Create a chunker from configuration
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.max_chars, config.min_chars)
    }

    /// Split cleaned text into ordered chunks.
    ///
    /// Deterministic for identical input and configuration. Every returned
    /// chunk is non-empty and at most `max_chars` characters.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let mut chunks: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_chars = 0usize;

        for sentence in text.split_sentence_bounds() {
            for piece in split_oversized(sentence, self.max_chars) {
                let piece_trimmed_chars = piece.trim().chars().count();
                if piece_trimmed_chars == 0 {
                    continue;
                }

                if current_chars > 0 && current_chars + piece_trimmed_chars + 1 > self.max_chars {
                    chunks.push(std::mem::take(&mut current).trim().to_string());
                    current_chars = 0;
                }

                if current_chars > 0 {
                    current.push(' ');
                    current_chars += 1;
                }
                current.push_str(piece.trim());
                current_chars += piece_trimmed_chars;
            }
        }

        let last = current.trim().to_string();
        if !last.is_empty() {
            // A short trailing fragment joins the previous chunk when the
            // merged chunk stays within the maximum bound.
            match chunks.last_mut() {
                Some(prev)
                    if last.chars().count() < self.min_chars
                        && prev.chars().count() + 1 + last.chars().count() <= self.max_chars =>
                {
                    prev.push(' ');
                    prev.push_str(&last);
                }
                _ => chunks.push(last),
            }
        }

        chunks
    }
}

/// Split a single sentence longer than `max_chars` into word-bounded pieces,
/// falling back to character boundaries for unbroken runs.
fn split_oversized(sentence: &str, max_chars: usize) -> Vec<&str> {
    if sentence.chars().count() <= max_chars {
        return vec![sentence];
    }

    let mut pieces = Vec::new();
    let mut start = 0usize;
    let mut chars_in_piece = 0usize;
    let mut last_space: Option<usize> = None;

    for (idx, ch) in sentence.char_indices() {
        if ch.is_whitespace() {
            last_space = Some(idx);
        }
        chars_in_piece += 1;

        if chars_in_piece > max_chars {
            let cut = match last_space {
                Some(space) if space > start => space,
                _ => idx,
            };
            pieces.push(&sentence[start..cut]);
            start = cut;
            chars_in_piece = sentence[cut..idx + ch.len_utf8()].chars().count();
            last_space = None;
        }
    }

    if start < sentence.len() {
        pieces.push(&sentence[start..]);
    }

    pieces
}
