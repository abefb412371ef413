//! Heuristic classification tables
//!
//! Pure mappings, one cue list per section label and one topic table for
//! condition detection. Matching is lowercase substring containment; cues
//! carry both accented and accent-stripped spellings because PDF extraction
//! is inconsistent about diacritics.

use crate::types::SectionLabel;

/// Keyword cues associated with a section label
pub fn cues(label: SectionLabel) -> &'static [&'static str] {
    match label {
        SectionLabel::Definition => &[
            "est une maladie",
            "est une infection",
            "est une inflammation",
            "est un trouble",
            "est une affection",
            "se caractérise",
            "se caracterise",
            "se définit",
            "se definit",
            "désigne",
            "designe",
            "correspond à",
            "correspond a",
            "qu'est-ce que",
            "définition",
            "definition",
        ],
        SectionLabel::Symptoms => &[
            "symptôme",
            "symptome",
            "signes",
            "se manifeste",
            "se traduit par",
            "fièvre",
            "fievre",
            "douleur",
            "fatigue",
            "toux",
            "nausée",
            "nausee",
            "vomissement",
            "soif",
            "courbature",
            "éruption",
            "eruption",
        ],
        SectionLabel::Treatment => &[
            "traitement",
            "traiter",
            "se soigne",
            "soigner",
            "médicament",
            "medicament",
            "antibiotique",
            "paracétamol",
            "paracetamol",
            "prise en charge",
            "repos",
            "hydratation",
            "antalgique",
        ],
        SectionLabel::WhenToConsult => &[
            "consulter",
            "consultez",
            "consultation",
            "avis médical",
            "avis medical",
            "votre médecin",
            "votre medecin",
            "urgences",
            "appeler le 15",
            "samu",
            "symptômes persistent",
            "symptomes persistent",
        ],
    }
}

/// Map a question to filename keywords for the condition it names.
///
/// Keeps answers from mixing several conditions: when a topic is detected,
/// retrieved chunks from other brochures are filtered out. An empty result
/// means no topic was recognized.
pub fn topic_keywords(question: &str) -> &'static [&'static str] {
    let q = question.to_lowercase();

    if q.contains("otite") {
        return &["otite"];
    }
    if q.contains("rhinopharyng") {
        return &["rhinopharyngite"];
    }
    if q.contains("angine") {
        return &["angine"];
    }
    if q.contains("fièvre") || q.contains("fievre") {
        return &["fievre"];
    }
    if q.contains("gastro") {
        return &["gastro"];
    }
    if q.contains("bronchiolite") {
        return &["bronchiolite"];
    }
    if q.contains("hypertension") || q.contains("tension") {
        return &["hypertension"];
    }
    if q.contains("diabète") || q.contains("diabete") {
        return &["diabete"];
    }
    if q.contains("migraine") {
        return &["migraine"];
    }
    if q.contains("grippe") {
        return &["grippe"];
    }
    if q.contains("covid") {
        return &["covid"];
    }
    if q.contains("asthme") {
        return &["asthme"];
    }
    if q.contains("allerg") {
        return &["allergie", "allergies"];
    }
    if q.contains("cholestérol") || q.contains("cholesterol") {
        return &["cholesterol"];
    }

    &[]
}

/// Whether a sentence matches any cue of the given label
pub fn matches_label(sentence: &str, label: SectionLabel) -> bool {
    let lower = sentence.to_lowercase();
    cues(label).iter().any(|cue| lower.contains(cue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_cues_match_definitional_sentences() {
        assert!(matches_label(
            "Le diabète est une maladie chronique liée à un excès de sucre dans le sang.",
            SectionLabel::Definition
        ));
        assert!(!matches_label(
            "Buvez de l'eau régulièrement tout au long de la journée.",
            SectionLabel::Definition
        ));
    }

    #[test]
    fn symptom_cues_match_symptom_sentences() {
        assert!(matches_label(
            "Les symptômes incluent une soif intense et une fatigue inhabituelle.",
            SectionLabel::Symptoms
        ));
        assert!(matches_label(
            "Une fievre elevee apparait brutalement.",
            SectionLabel::Symptoms
        ));
    }

    #[test]
    fn treatment_cues_match_treatment_sentences() {
        assert!(matches_label(
            "Le traitement repose sur une bonne hydratation et du repos.",
            SectionLabel::Treatment
        ));
        assert!(!matches_label(
            "La grippe se transmet par les gouttelettes.",
            SectionLabel::Treatment
        ));
    }

    #[test]
    fn consult_cues_match_consultation_sentences() {
        assert!(matches_label(
            "Consultez votre médecin si les symptômes persistent plus de 48 heures.",
            SectionLabel::WhenToConsult
        ));
    }

    #[test]
    fn topic_detection_covers_accented_and_plain_spellings() {
        assert_eq!(topic_keywords("Quels sont les symptômes du diabète ?"), &["diabete"]);
        assert_eq!(topic_keywords("comment soigner le diabete"), &["diabete"]);
        assert_eq!(topic_keywords("traitement de la grippe"), &["grippe"]);
        assert!(topic_keywords("Comment bien dormir ?").is_empty());
    }
}
