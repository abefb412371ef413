//! Core data types

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, Document, FileType};
pub use query::QueryRequest;
pub use response::{Answer, AnswerSection, QueryResponse, SectionLabel, SourceRef};
