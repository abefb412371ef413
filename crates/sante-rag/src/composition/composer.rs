//! Extractive answer composition
//!
//! Builds a sectioned answer out of retrieved chunk text. Every sentence in
//! the output is copied verbatim from a retrieved chunk (truncation aside);
//! only the fixed section headings are added text.

use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

use crate::config::ComposerConfig;
use crate::retrieval::{EmbeddingIndex, ScoredChunk};
use crate::types::{Answer, AnswerSection, SectionLabel, SourceRef};

use super::sections::{matches_label, topic_keywords};

/// Bibliographic fragments; sentences carrying them are footer references,
/// not prose
const BIBLIO_PATTERNS: &[&str] = &[
    "santé publique france",
    "sante publique france",
    "consulté le",
    "consulte le",
    "site internet",
    "saint-maurice",
    "document de référence",
    "document de reference",
    "pdf ,",
];

/// A sentence starting with a month name is a dateline or reference header
const MONTHS: &[&str] = &[
    "janvier", "février", "fevrier", "mars", "avril", "mai", "juin", "juillet", "août", "aout",
    "septembre", "octobre", "novembre", "décembre", "decembre",
];

/// Maximum characters for the per-source snippet shown in the source list
const SOURCE_SNIPPET_CHARS: usize = 160;

/// Extractive answer composer
pub struct AnswerComposer {
    config: ComposerConfig,
}

impl AnswerComposer {
    /// Create a new composer
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    /// Compose a sectioned answer from retrieved chunks.
    ///
    /// An empty retrieval yields the explicit no-information answer; content
    /// is never fabricated outside the retrieved text.
    pub fn compose(
        &self,
        index: &EmbeddingIndex,
        question: &str,
        results: &[ScoredChunk],
    ) -> Answer {
        if results.is_empty() {
            return Answer::no_information();
        }

        let results = filter_by_topic(index, question, results);

        // Candidate sentences in retrieval order, tagged with their chunk
        let mut candidates: Vec<(usize, String)> = Vec::new();
        for (chunk_pos, scored) in results.iter().enumerate() {
            for sentence in scored.chunk.text.split_sentence_bounds() {
                let sentence = sentence.trim();
                if self.is_noise(sentence) {
                    continue;
                }
                candidates.push((chunk_pos, sentence.to_string()));
            }
        }

        let mut sections = Vec::new();
        let mut used_chunks: Vec<usize> = Vec::new();

        for label in SectionLabel::ALL {
            let selected: Vec<&(usize, String)> = candidates
                .iter()
                .filter(|(_, sentence)| matches_label(sentence, label))
                .take(self.config.max_sentences_per_section)
                .collect();

            if selected.is_empty() {
                continue;
            }

            used_chunks.extend(selected.iter().map(|(pos, _)| *pos));

            let text = selected
                .iter()
                .map(|(_, sentence)| sentence.as_str())
                .collect::<Vec<_>>()
                .join(" ");

            sections.push(AnswerSection {
                label,
                heading: label.heading().to_string(),
                text: truncate_at_word(&text, self.config.max_snippet_chars),
            });
        }

        if sections.is_empty() {
            return Answer::no_information();
        }

        let sources = collect_sources(index, &results, &used_chunks);

        Answer {
            sections,
            sources,
            notice: Answer::disclaimer(),
        }
    }

    /// Noise filter: too-short fragments, bibliography, datelines
    fn is_noise(&self, sentence: &str) -> bool {
        if sentence.chars().count() < self.config.min_sentence_chars {
            return true;
        }
        let lower = sentence.to_lowercase();
        if BIBLIO_PATTERNS.iter().any(|p| lower.contains(p)) {
            return true;
        }
        MONTHS.iter().any(|m| lower.starts_with(m))
    }
}

/// Keep only chunks whose brochure filename matches the detected topic; fall
/// back to the unfiltered set when the filter would remove everything.
fn filter_by_topic<'a>(
    index: &EmbeddingIndex,
    question: &str,
    results: &'a [ScoredChunk],
) -> Vec<&'a ScoredChunk> {
    let keywords = topic_keywords(question);
    let all: Vec<&ScoredChunk> = results.iter().collect();
    if keywords.is_empty() {
        return all;
    }

    let filtered: Vec<&ScoredChunk> = results
        .iter()
        .filter(|scored| {
            index
                .document_for(&scored.chunk)
                .map(|doc| {
                    let filename = doc.filename.to_lowercase();
                    keywords.iter().any(|kw| filename.contains(kw))
                })
                .unwrap_or(false)
        })
        .collect();

    if filtered.is_empty() {
        all
    } else {
        filtered
    }
}

/// Distinct source documents backing the chunks used in sections, best score
/// first
fn collect_sources(
    index: &EmbeddingIndex,
    results: &[&ScoredChunk],
    used_chunks: &[usize],
) -> Vec<SourceRef> {
    let mut best_per_document: HashMap<Uuid, &ScoredChunk> = HashMap::new();

    for &pos in used_chunks {
        let scored = results[pos];
        best_per_document
            .entry(scored.chunk.document_id)
            .and_modify(|best| {
                if scored.score > best.score {
                    *best = scored;
                }
            })
            .or_insert(scored);
    }

    let mut sources: Vec<SourceRef> = best_per_document
        .values()
        .map(|scored| {
            let filename = index
                .document_for(&scored.chunk)
                .map(|doc| doc.filename.clone())
                .unwrap_or_else(|| "document inconnu".to_string());

            SourceRef {
                document_id: scored.chunk.document_id,
                filename,
                score: scored.score,
                chunk_index: scored.chunk.chunk_index,
                snippet: truncate_at_word(&scored.chunk.text, SOURCE_SNIPPET_CHARS),
            }
        })
        .collect();

    sources.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.filename.cmp(&b.filename))
    });
    sources
}

/// Truncate to a maximum number of characters at a word boundary
fn truncate_at_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let end: usize = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    let cut = text[..end].rfind(' ').unwrap_or(end);
    format!("{}…", text[..cut].trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::HashEmbedder;
    use crate::embedding::EmbeddingProvider;
    use crate::types::{Document, FileType};
    use std::path::PathBuf;

    fn doc(name: &str) -> Document {
        Document::new(
            name.to_string(),
            PathBuf::from(name),
            FileType::Txt,
            format!("hash-{}", name),
            100,
        )
    }

    fn composer() -> AnswerComposer {
        AnswerComposer::new(ComposerConfig::default())
    }

    async fn diabetes_index() -> EmbeddingIndex {
        let embedder = HashEmbedder::new(64);
        let corpus = vec![
            (
                doc("diabete.txt"),
                vec![
                    "Le diabète est une maladie chronique caractérisée par un excès de sucre dans le sang. \
                     Les symptômes du diabète sont une soif intense, une fatigue durable et un besoin fréquent d'uriner."
                        .to_string(),
                    "Le traitement du diabète repose sur une alimentation équilibrée et parfois des médicaments. \
                     Consultez votre médecin en cas de doute sur votre glycémie."
                        .to_string(),
                ],
            ),
            (
                doc("grippe.txt"),
                vec![
                    "La grippe est une infection virale qui provoque une fièvre élevée et des courbatures."
                        .to_string(),
                ],
            ),
        ];
        EmbeddingIndex::build(corpus, &embedder).await.unwrap()
    }

    async fn retrieve_all(index: &EmbeddingIndex, question: &str) -> Vec<ScoredChunk> {
        let embedder = HashEmbedder::new(64);
        let vector = embedder.embed(question).await.unwrap();
        index.query(&vector, 10)
    }

    #[tokio::test]
    async fn empty_retrieval_yields_no_information() {
        let index = diabetes_index().await;
        let answer = composer().compose(&index, "Question sans résultats", &[]);
        assert!(answer.sections.is_empty());
        assert!(answer.sources.is_empty());
        assert!(answer.notice.contains("aucune information"));
    }

    #[tokio::test]
    async fn diabetes_question_fills_symptom_section_from_the_right_brochure() {
        let index = diabetes_index().await;
        let question = "Quels sont les symptômes du diabète ?";
        let results = retrieve_all(&index, question).await;

        let answer = composer().compose(&index, question, &results);

        let symptoms = answer
            .sections
            .iter()
            .find(|s| s.label == SectionLabel::Symptoms)
            .expect("symptoms section present");
        assert!(symptoms.text.contains("soif"));

        // Topic filter keeps the diabetes brochure only
        assert_eq!(answer.sources.len(), 1);
        assert_eq!(answer.sources[0].filename, "diabete.txt");
    }

    #[tokio::test]
    async fn sections_without_matching_cues_are_omitted() {
        let embedder = HashEmbedder::new(64);
        let corpus = vec![(
            doc("gastro.txt"),
            vec![
                "La gastro-entérite se traduit par des nausées et des vomissements pendant quelques jours."
                    .to_string(),
            ],
        )];
        let index = EmbeddingIndex::build(corpus, &embedder).await.unwrap();
        let results = retrieve_all(&index, "symptômes de la gastro").await;

        let answer = composer().compose(&index, "symptômes de la gastro", &results);

        assert!(answer.sections.iter().any(|s| s.label == SectionLabel::Symptoms));
        assert!(!answer.sections.iter().any(|s| s.label == SectionLabel::Treatment));
    }

    #[tokio::test]
    async fn every_section_sentence_is_extracted_from_a_retrieved_chunk() {
        let index = diabetes_index().await;
        let question = "Comment soigner le diabète ?";
        let results = retrieve_all(&index, question).await;

        // Large snippet limit so truncation does not interfere with the check
        let composer = AnswerComposer::new(ComposerConfig {
            max_snippet_chars: 10_000,
            ..ComposerConfig::default()
        });
        let answer = composer.compose(&index, question, &results);
        assert!(!answer.sections.is_empty());

        for section in &answer.sections {
            for sentence in section.text.split_sentence_bounds() {
                let sentence = sentence.trim();
                if sentence.is_empty() {
                    continue;
                }
                assert!(
                    results.iter().any(|r| r.chunk.text.contains(sentence)),
                    "sentence not found in any retrieved chunk: {}",
                    sentence
                );
            }
        }
    }

    #[tokio::test]
    async fn sections_respect_the_snippet_limit() {
        let index = diabetes_index().await;
        let question = "diabète";
        let results = retrieve_all(&index, question).await;

        let composer = AnswerComposer::new(ComposerConfig {
            max_snippet_chars: 80,
            ..ComposerConfig::default()
        });
        let answer = composer.compose(&index, question, &results);

        for section in &answer.sections {
            assert!(section.text.chars().count() <= 81, "section over limit");
        }
    }

    #[tokio::test]
    async fn unrecognized_topic_keeps_all_retrieved_sources() {
        let index = diabetes_index().await;
        // No known condition in the question: no topic filter applies
        let question = "fatigue et soif importantes";
        let results = retrieve_all(&index, question).await;

        let answer = composer().compose(&index, question, &results);
        assert!(!answer.sources.is_empty());
    }

    #[test]
    fn truncation_cuts_at_word_boundaries() {
        let text = "Une phrase assez longue pour devoir être coupée proprement.";
        let truncated = truncate_at_word(text, 25);
        assert!(truncated.ends_with('…'));
        assert!(truncated.chars().count() <= 26);
        assert!(!truncated.contains("coupée"));
    }

    #[test]
    fn short_text_is_not_truncated() {
        assert_eq!(truncate_at_word("Court.", 100), "Court.");
    }
}
