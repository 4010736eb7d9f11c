//! Flare: singular-self boundary filter between a language model and a human
//!
//! Rule set (rewrite + block + detect) → FlareSession pipeline → event log

pub mod core;
pub mod types;

// =============================================================================
// SESSION DEFAULTS
// =============================================================================

/// Total messages (human + assistant) before the recursion guard fires
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 8;

/// Human context message used when only model output is supplied
pub const HARNESS_CONTEXT: &str = "HARNESS_TEST_CONTEXT";

// =============================================================================
// EVENT DETAIL KEYS
// =============================================================================

/// Raw assistant text before the SSNZ rewrite
pub const DETAIL_ORIGINAL: &str = "original";

/// Assistant text after the SSNZ rewrite
pub const DETAIL_UPDATED: &str = "updated";

/// Text that triggered a block or a detector
pub const DETAIL_CONTENT: &str = "content";

/// Phrase matched by a log-only detector
pub const DETAIL_PHRASE: &str = "phrase";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.1.0";
