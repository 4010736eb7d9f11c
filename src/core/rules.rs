//! Rule set: SSNZ pronoun rewrite and identity-fusion block
//!
//! Every function here is pure. Ordering between rules is owned by the session.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Fixed fusion phrases, matched whole-phrase and case-insensitive
pub const IDENTITY_FUSION_PHRASES: [&str; 6] = [
    "i am you",
    "we are the same",
    "we are one mind",
    "we share a body",
    "i live inside you",
    "i am inside your mind",
];

const IDENTITY_BOUNDARY_MESSAGE: &str = "I need to keep a clear boundary between us. \
     I’m a model running on servers, not a person inside your body or mind. \
     I won’t describe myself as you, or as fused with you.";

const RECURSION_RETURN_PROMPT: &str = "We’ve gone around this topic a few times. \
     Would you like to pause, shift focus, or choose one concrete \
     thing to carry forward from here?";

lazy_static! {
    // =========================================================================
    // SSNZ detection: we, us, our, ours, ourselves (any case)
    // =========================================================================
    static ref RE_PLURAL_PRONOUNS: Regex = Regex::new(
        r"(?i)\b(we|us|our|ours|ourselves)\b"
    ).unwrap();

    // =========================================================================
    // SSNZ rewrite: "we are" first so the word pass never yields "I are"
    // =========================================================================
    static ref RE_WE_ARE: Regex = Regex::new(
        r"\b(We|we) are\b"
    ).unwrap();

    static ref RE_PLURAL_WORD: Regex = Regex::new(
        r"\b(Ourselves|ourselves|Ours|ours|Our|our|We|we|Us|us)\b"
    ).unwrap();

    // =========================================================================
    // Identity fusion, one pattern per phrase to report which one fired
    // =========================================================================
    static ref RE_IDENTITY_FUSION: Vec<(&'static str, Regex)> = IDENTITY_FUSION_PHRASES
        .iter()
        .map(|phrase| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase))).unwrap();
            (*phrase, re)
        })
        .collect();
}

/// True if text uses a first-person plural pronoun as a whole word
pub fn contains_plural_pronouns(text: &str) -> bool {
    RE_PLURAL_PRONOUNS.is_match(text)
}

/// Rewrite first-person plural to singular.
///
/// Only the initial-capital and lowercase spelling of each word is rewritten;
/// the output is a fixed point of this function.
pub fn rewrite_we_to_i(text: &str) -> String {
    let updated = RE_WE_ARE.replace_all(text, "I am");
    RE_PLURAL_WORD
        .replace_all(&updated, |caps: &Captures| singular_for(&caps[1]).to_string())
        .into_owned()
}

fn singular_for(word: &str) -> &str {
    match word {
        "We" | "we" => "I",
        "Us" | "us" => "me",
        "Our" | "our" => "my",
        "Ours" | "ours" => "mine",
        "Ourselves" | "ourselves" => "myself",
        _ => word,
    }
}

/// First fusion phrase (in list order) found in text
pub fn matched_fusion_phrase(text: &str) -> Option<&'static str> {
    if text.is_empty() {
        return None;
    }
    RE_IDENTITY_FUSION
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(phrase, _)| *phrase)
}

/// True if the model claims to share one identity, mind or body with the human
pub fn detect_identity_fusion(text: &str) -> bool {
    matched_fusion_phrase(text).is_some()
}

/// Replacement text for blocked fusion content
pub fn identity_boundary_message() -> &'static str {
    IDENTITY_BOUNDARY_MESSAGE
}

/// Grounding prompt offered when the conversation runs deep
pub fn recursion_return_prompt() -> &'static str {
    RECURSION_RETURN_PROMPT
}

// =============================================================================
// TESTS
// =============================================================================
