//! Answer and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed answer section labels, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    /// What the condition is
    Definition,
    /// How it manifests
    Symptoms,
    /// How it is treated
    Treatment,
    /// When to see a doctor
    WhenToConsult,
}

impl SectionLabel {
    /// All labels in the order sections appear in an answer
    pub const ALL: [SectionLabel; 4] = [
        SectionLabel::Definition,
        SectionLabel::Symptoms,
        SectionLabel::Treatment,
        SectionLabel::WhenToConsult,
    ];

    /// French heading shown above the section
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Definition => "Définition",
            Self::Symptoms => "Symptômes",
            Self::Treatment => "Traitement",
            Self::WhenToConsult => "Quand consulter",
        }
    }
}

/// One composed answer section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSection {
    /// Section label
    pub label: SectionLabel,
    /// French heading
    pub heading: String,
    /// Extracted text, every sentence copied from a retrieved chunk
    pub text: String,
}

/// A source document backing an answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    /// Document ID
    pub document_id: Uuid,
    /// Brochure filename
    pub filename: String,
    /// Best similarity score among this document's retrieved chunks
    pub score: f32,
    /// Index of the best-scoring retrieved chunk within the document
    pub chunk_index: u32,
    /// Short extract from that chunk
    pub snippet: String,
}

/// Structured extractive answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Sections present in the retrieved text, in fixed label order
    pub sections: Vec<AnswerSection>,
    /// Distinct source documents backing the sections
    pub sources: Vec<SourceRef>,
    /// User-facing notice (no-results message, or the standard disclaimer)
    pub notice: String,
}

impl Answer {
    /// Answer for an empty retrieval: no sections, no sources, explicit message
    pub fn no_information() -> Self {
        Self {
            sections: Vec::new(),
            sources: Vec::new(),
            notice: "Je n'ai trouvé aucune information pertinente sur ce sujet dans les \
                     brochures chargées. Merci de vérifier que les brochures contiennent \
                     bien des informations sur cette question."
                .to_string(),
        }
    }

    /// Standard disclaimer attached to every non-empty answer
    pub fn disclaimer() -> String {
        "Ces extraits proviennent directement des brochures. Ils fournissent une \
         information générale et ne remplacent en aucun cas l'avis d'un professionnel \
         de santé."
            .to_string()
    }

    /// Whether any section carries text
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Response from a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The question as asked
    pub question: String,
    /// The composed answer
    pub answer: Answer,
    /// Number of chunks retrieved before composition
    pub chunks_retrieved: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Summary of an indexed brochure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document ID
    pub id: Uuid,
    /// Filename
    pub filename: String,
    /// File type
    pub file_type: super::FileType,
    /// Number of chunks in the index
    pub total_chunks: u32,
    /// Indexing timestamp
    pub ingested_at: chrono::DateTime<chrono::Utc>,
}

impl From<&super::Document> for DocumentSummary {
    fn from(doc: &super::Document) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            file_type: doc.file_type,
            total_chunks: doc.total_chunks,
            ingested_at: doc.ingested_at,
        }
    }
}

/// Response for listing brochures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    /// List of indexed brochures
    pub documents: Vec<DocumentSummary>,
    /// Total count
    pub total_count: usize,
}
