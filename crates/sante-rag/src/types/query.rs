//! Query request types

use serde::{Deserialize, Serialize};

/// Query request: one user question, one independent request/response cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer (French)
    pub question: String,

    /// Number of chunks to retrieve (default: 3)
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    3
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            question: String::new(),
            top_k: 3,
        }
    }
}

impl QueryRequest {
    /// Create a new query
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    /// Set the number of chunks to retrieve
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }
}
