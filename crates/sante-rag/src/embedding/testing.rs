//! Deterministic in-process embedder for tests
//!
//! Hashed bag-of-words vectors: identical text always maps to the identical
//! vector, and texts sharing vocabulary land close in cosine space. No model
//! server is needed, which keeps the pipeline tests hermetic.

use async_trait::async_trait;

use crate::error::Result;

use super::provider::EmbeddingProvider;

/// Bag-of-words hashing embedder with a fixed dimension
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for word in text.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
            if word.len() < 3 {
                continue;
            }
            let bucket = (fnv1a(word.as_bytes()) as usize) % self.dimensions;
            vector[bucket] += 1.0;
        }
        vector
    }
}

/// FNV-1a, fixed keys so vectors are stable across processes
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_sync(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "hash-test"
    }
}
