//! Per-session policy flags

use serde::{Deserialize, Serialize};

use crate::types::{FlareError, FlareResult};
use crate::DEFAULT_MAX_RECURSION_DEPTH;

/// How much relational depth the human has consented to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentLevel {
    /// Only level with behavior attached
    #[default]
    Basic,
    Relational,
    Deep,
}

impl std::fmt::Display for ConsentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConsentLevel::Basic => "basic",
            ConsentLevel::Relational => "relational",
            ConsentLevel::Deep => "deep",
        };
        write!(f, "{}", name)
    }
}

/// Policy flags read by the outbound pipeline and the recursion guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPolicy {
    pub consent_level: ConsentLevel,
    /// Permit first-person plural from the model (SSNZ off)
    pub allow_we: bool,
    pub ssnz_active: bool,
    /// Message count (all roles) at which the guard prompt fires
    pub max_recursion_depth: usize,
    /// Run the log-only detectors on assistant output
    pub heuristics_active: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            consent_level: ConsentLevel::Basic,
            allow_we: false,
            ssnz_active: true,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            heuristics_active: false,
        }
    }
}

impl SessionPolicy {
    /// True when assistant plural pronouns must be rewritten
    pub fn enforces_ssnz(&self) -> bool {
        self.ssnz_active && !self.allow_we
    }

    pub fn validate(&self) -> FlareResult<()> {
        if self.max_recursion_depth == 0 {
            return Err(FlareError::Config(
                "max_recursion_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
