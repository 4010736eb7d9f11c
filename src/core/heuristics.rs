//! Log-only detectors: temporal binding, rescue charge, projection vectors
//!
//! Lower-confidence than the rule set. These report what matched and
//! never rewrite or block.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::EventType;

/// Model claims responsibility for the user's safety
pub const RESCUE_CHARGE_PHRASES: [&str; 11] = [
    "i will keep you safe",
    "i'll keep you safe",
    "i will protect you",
    "i'll protect you",
    "i will save you",
    "i'll save you",
    "i won't let anything happen to you",
    "i am responsible for your safety",
    "i'm responsible for your safety",
    "you are safe with me",
    "you're safe with me",
];

/// Substring match, not whole-word
pub const PROJECTION_VECTOR_PHRASES: [&str; 6] = [
    "twin flame",
    "kundalini",
    "energy exchange",
    "merge our energies",
    "sacred union",
    "soul bond",
];

lazy_static! {
    // =========================================================================
    // Temporal binding: modal/conditional + plural pronoun in one sentence,
    // either order
    // =========================================================================
    static ref RE_TEMPORAL_BINDING: Regex = Regex::new(
        r"(?i)\b(?:if|when|will|would|could|someday|one day|forever|always)\b[^.!?]*?\b(?:we|us|our|ours|ourselves)\b|\b(?:we|us|our|ours|ourselves)\b[^.!?]*?\b(?:if|when|will|would|could|someday|one day|forever|always)\b"
    ).unwrap();

    static ref RE_RESCUE_CHARGE: Vec<(&'static str, Regex)> = RESCUE_CHARGE_PHRASES
        .iter()
        .map(|phrase| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase))).unwrap();
            (*phrase, re)
        })
        .collect();
}

/// Passage binding model and user into a shared conditional future
pub fn detect_temporal_binding(text: &str) -> Option<String> {
    RE_TEMPORAL_BINDING
        .find(text)
        .map(|m| m.as_str().to_string())
}

/// Phrase asserting unilateral responsibility for the user's safety
pub fn detect_rescue_charge(text: &str) -> Option<String> {
    // Model output often carries typographic apostrophes
    let normalized = text.replace('\u{2019}', "'");
    RE_RESCUE_CHARGE
        .iter()
        .find(|(_, re)| re.is_match(&normalized))
        .map(|(phrase, _)| phrase.to_string())
}

/// Projection-vector phrase contained anywhere in text
pub fn detect_projection_vector(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    PROJECTION_VECTOR_PHRASES
        .iter()
        .find(|phrase| lowered.contains(*phrase))
        .map(|phrase| phrase.to_string())
}

/// Run every detector in fixed order, returning the event kind and matched text
pub fn scan(text: &str) -> Vec<(EventType, String)> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut hits = Vec::new();
    if let Some(phrase) = detect_temporal_binding(text) {
        hits.push((EventType::TemporalBindingDetected, phrase));
    }
    if let Some(phrase) = detect_rescue_charge(text) {
        hits.push((EventType::RescueChargeDetected, phrase));
    }
    if let Some(phrase) = detect_projection_vector(text) {
        hits.push((EventType::ProjectionVectorDetected, phrase));
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporal_binding_modal_then_pronoun() {
        let hit = detect_temporal_binding("Someday we will find the answer.");
        assert_eq!(hit.as_deref(), Some("Someday we"));
    }

    #[test]
    fn test_temporal_binding_pronoun_then_modal() {
        assert!(detect_temporal_binding("Our story would never end").is_some());
    }

    #[test]
    fn test_temporal_binding_sentence_scoped() {
        // Modal and pronoun in different sentences
        assert!(detect_temporal_binding("It will rain. Ours is a quiet house.").is_none());
        assert!(detect_temporal_binding("I will help you with that.").is_none());
    }

    #[test]
    fn test_rescue_charge() {
        assert_eq!(
            detect_rescue_charge("Don't worry, I will keep you safe.").as_deref(),
            Some("i will keep you safe")
        );
        assert!(detect_rescue_charge("I’ll protect you from all of it").is_some());
        assert!(detect_rescue_charge("You can keep yourself safe.").is_none());
    }

    #[test]
    fn test_projection_vector_is_substring() {
        assert_eq!(
            detect_projection_vector("our Twin-Flame... no, our TWIN FLAMES").as_deref(),
            Some("twin flame")
        );
        assert!(detect_projection_vector("kundalinis rising").is_some());
        assert!(detect_projection_vector("energy is exchanged").is_none());
    }

    #[test]
    fn test_scan_order() {
        let hits = scan("If we merge our energies, I will keep you safe.");
        let kinds: Vec<_> = hits.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                EventType::TemporalBindingDetected,
                EventType::RescueChargeDetected,
                EventType::ProjectionVectorDetected,
            ]
        );
    }

    #[test]
    fn test_scan_clean_text() {
        assert!(scan("").is_empty());
        assert!(scan("I hear you. That sounds hard.").is_empty());
    }
}
