//! Audit trail entries produced when a rule fires

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use colored::Color;
use serde::{Deserialize, Serialize};

/// Two tiers of intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Content was rewritten or replaced
    Block,
    /// Recorded only, content untouched
    Log,
}

/// Every kind of intervention the session can record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    // =========================================================================
    // Block tier
    // =========================================================================
    /// First-person plural rewritten to singular
    SsnzViolation,
    /// Fusion claim replaced with the boundary message
    IdentityFusionBlocked,

    // =========================================================================
    // Log tier
    // =========================================================================
    /// Grounding prompt injected at depth
    RecursionReturnPrompt,
    /// Model and user bound into a shared conditional future
    TemporalBindingDetected,
    /// Model claims responsibility for the user's safety
    RescueChargeDetected,
    /// Projection-vector vocabulary
    ProjectionVectorDetected,
}

impl EventType {
    /// Code string as it appears in logs and JSON
    pub fn code(&self) -> &'static str {
        match self {
            Self::SsnzViolation => "SSNZ_VIOLATION",
            Self::IdentityFusionBlocked => "IDENTITY_FUSION_BLOCKED",
            Self::RecursionReturnPrompt => "RECURSION_RETURN_PROMPT",
            Self::TemporalBindingDetected => "TEMPORAL_BINDING_DETECTED",
            Self::RescueChargeDetected => "RESCUE_CHARGE_DETECTED",
            Self::ProjectionVectorDetected => "PROJECTION_VECTOR_DETECTED",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SsnzViolation => "Plural pronouns rewritten to singular",
            Self::IdentityFusionBlocked => "Identity fusion blocked",
            Self::RecursionReturnPrompt => "Recursion guard injected",
            Self::TemporalBindingDetected => "Temporal binding detected",
            Self::RescueChargeDetected => "Rescue charge detected",
            Self::ProjectionVectorDetected => "Projection vector detected",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::SsnzViolation | Self::IdentityFusionBlocked => Severity::Block,
            Self::RecursionReturnPrompt
            | Self::TemporalBindingDetected
            | Self::RescueChargeDetected
            | Self::ProjectionVectorDetected => Severity::Log,
        }
    }

    /// Terminal color for rendering
    pub fn color(&self) -> Color {
        match self {
            Self::SsnzViolation => Color::Yellow,
            Self::IdentityFusionBlocked => Color::Red,
            Self::RecursionReturnPrompt => Color::Cyan,
            _ => Color::BrightBlack,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One logged intervention. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    event_type: EventType,
    details: BTreeMap<String, String>,
    timestamp: DateTime<Utc>,
}

impl Event {
    /// Create new event stamped with the current time
    pub fn new<K, V>(event_type: EventType, details: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            event_type,
            details: details
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            timestamp: Utc::now(),
        }
    }

    /// Event with no details
    pub fn bare(event_type: EventType) -> Self {
        Self::new(event_type, std::iter::empty::<(String, String)>())
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn details(&self) -> &BTreeMap<String, String> {
        &self.details
    }

    /// Look up a single detail value
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Single-line rendering for the event log
    pub fn to_parseable_string(&self) -> String {
        let details = self
            .details
            .iter()
            .map(|(k, v)| format!("{}={:?}", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        if details.is_empty() {
            self.event_type.code().to_string()
        } else {
            format!("{} | {}", self.event_type.code(), details)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_serializes_screaming_snake() {
        let json = serde_json::to_string(&EventType::SsnzViolation).unwrap();
        assert_eq!(json, "\"SSNZ_VIOLATION\"");
        let json = serde_json::to_string(&EventType::IdentityFusionBlocked).unwrap();
        assert_eq!(json, "\"IDENTITY_FUSION_BLOCKED\"");
    }

    #[test]
    fn test_code_matches_serde_name() {
        for kind in [
            EventType::SsnzViolation,
            EventType::IdentityFusionBlocked,
            EventType::RecursionReturnPrompt,
            EventType::TemporalBindingDetected,
            EventType::RescueChargeDetected,
            EventType::ProjectionVectorDetected,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
        }
    }

    #[test]
    fn test_severity_tiers() {
        assert_eq!(EventType::SsnzViolation.severity(), Severity::Block);
        assert_eq!(EventType::IdentityFusionBlocked.severity(), Severity::Block);
        assert_eq!(EventType::RescueChargeDetected.severity(), Severity::Log);
        assert_eq!(EventType::RecursionReturnPrompt.severity(), Severity::Log);
    }

    #[test]
    fn test_details_lookup() {
        let event = Event::new(EventType::SsnzViolation, [("original", "we"), ("updated", "I")]);
        assert_eq!(event.detail("original"), Some("we"));
        assert_eq!(event.detail("updated"), Some("I"));
        assert_eq!(event.detail("content"), None);
    }

    #[test]
    fn test_bare_event_parseable() {
        let event = Event::bare(EventType::RecursionReturnPrompt);
        assert!(event.details().is_empty());
        assert_eq!(event.to_parseable_string(), "RECURSION_RETURN_PROMPT");
    }
}
