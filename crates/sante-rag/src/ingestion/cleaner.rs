//! Raw text normalization
//!
//! Brochure text extracted from PDFs carries navigation menus, bibliographic
//! footers, reference markers and stray glyphs. `clean` strips these and
//! collapses whitespace, leaving plain prose.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Menu, button and feedback-widget fragments that appear in exported
/// brochure pages and carry no medical content.
const BOILERPLATE_PHRASES: &[&str] = &[
    "Cet article vous a-t-il été utile ?",
    "Cet article vous a-t-il été utile",
    "Assuré Entreprise Professionnel de santé",
    "Lire aussi",
    "Sites utiles",
    "Oui Non",
    "Copier le lien",
];

/// Bracketed reference markers: [1], [12], [réf. 3], [ref]
static REF_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\s*(?:\d{1,3}|réf\.?[^\]]{0,20}|ref\.?[^\]]{0,20})\s*\]").unwrap()
});

/// Characters outside letters, digits, whitespace and common French
/// punctuation. Covers bullets, box-drawing glyphs and private-use
/// characters that PDF extraction leaves behind.
static SYMBOL_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^\p{L}\p{N}\s.,;:!?()\[\]'"’«»%€°/+–-]+"#).unwrap());

/// Alternation over all boilerplate phrases, longest first
static BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    let alternation = BOILERPLATE_PHRASES
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// Runs of whitespace, including newlines
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize raw brochure text.
///
/// Removes navigation/boilerplate fragments, bracketed reference markers and
/// non-linguistic symbol runs, and collapses all whitespace to single spaces.
/// Idempotent: cleaning already-clean text is a no-op. Empty or
/// whitespace-only input yields an empty string, never an error.
pub fn clean(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    // Phrase removal can uncover a new match (a phrase split in two by
    // another phrase), so the pass runs to a fixpoint.
    let mut current = clean_pass(raw);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(text: &str) -> String {
    let text = text.replace(['\r', '\n', '\t'], " ");
    let text = SYMBOL_RUN.replace_all(&text, " ");
    let text = REF_MARKER.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = BOILERPLATE.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \n\t  "), "");
    }

    #[test]
    fn collapses_whitespace_and_newlines() {
        let raw = "Le diabète est une maladie\n\nchronique.   Elle  évolue.";
        assert_eq!(clean(raw), "Le diabète est une maladie chronique. Elle évolue.");
    }

    #[test]
    fn removes_reference_markers() {
        let raw = "La fièvre [1] est fréquente [réf. 12] chez l'enfant.";
        assert_eq!(clean(raw), "La fièvre est fréquente chez l'enfant.");
    }

    #[test]
    fn removes_boilerplate_phrases() {
        let raw = "Lire aussi Le traitement repose sur le repos. Cet article vous a-t-il été utile ? Oui Non";
        assert_eq!(clean(raw), "Le traitement repose sur le repos.");
    }

    #[test]
    fn removes_symbol_runs() {
        let raw = "• Symptômes ►► fièvre, toux ■■■ fatigue.";
        assert_eq!(clean(raw), "Symptômes fièvre, toux fatigue.");
    }

    #[test]
    fn keeps_french_punctuation_and_accents() {
        let raw = "L'angine : une infection fréquente (80 % d'origine virale), « bénigne » à 38,5 °C.";
        assert_eq!(
            clean(raw),
            "L'angine : une infection fréquente (80 % d'origine virale), « bénigne » à 38,5 °C."
        );
    }

    #[test]
    fn idempotent_on_varied_inputs() {
        let inputs = [
            "",
            "Texte déjà propre.",
            "Du texte\navec [3] des marqueurs • et Lire aussi des menus.",
            "Oui Non Oui Non Copier le lien",
            "Lire Lire aussi aussi",
        ];
        for raw in inputs {
            let once = clean(raw);
            assert_eq!(clean(&once), once, "clean not idempotent for {:?}", raw);
        }
    }
}
