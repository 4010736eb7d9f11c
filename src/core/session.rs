//! FlareSession: per-conversation state and the outbound pipeline
//!
//! Outbound order (assistant messages):
//! 1. SSNZ: plural pronouns → singular (when enforced)
//! 2. Identity fusion: post-rewrite text → boundary message
//! 3. Heuristics: log-only detectors over the raw text (when enabled)
//!
//! Behavior is a function of (message count, policy) at each call.

use tracing::{debug, info, warn};

use crate::core::{heuristics, rules};
use crate::types::{Event, EventType, Message, Severity, SessionPolicy, TurnReport};
use crate::{DETAIL_CONTENT, DETAIL_ORIGINAL, DETAIL_PHRASE, DETAIL_UPDATED};

/// State of a single human–model conversation
///
/// Owned by one caller at a time. History and events are append-only.
#[derive(Debug, Clone)]
pub struct FlareSession {
    session_id: String,
    /// Pseudonymous
    human_id: String,
    agent_id: String,
    /// Policy flags, read on every call
    pub policy: SessionPolicy,
    messages: Vec<Message>,
    events: Vec<Event>,
}

impl FlareSession {
    /// Create session with default policy (SSNZ on, depth 8)
    pub fn new(
        session_id: impl Into<String>,
        human_id: impl Into<String>,
        agent_id: impl Into<String>,
    ) -> Self {
        Self::with_policy(session_id, human_id, agent_id, SessionPolicy::default())
    }

    /// Create session with an explicit policy
    pub fn with_policy(
        session_id: impl Into<String>,
        human_id: impl Into<String>,
        agent_id: impl Into<String>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            human_id: human_id.into(),
            agent_id: agent_id.into(),
            policy,
            messages: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn human_id(&self) -> &str {
        &self.human_id
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Conversation history in insertion order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Every intervention so far, in order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Current depth: all messages, guard injections included
    pub fn depth(&self) -> usize {
        self.messages.len()
    }

    fn log_event(&mut self, event: Event) {
        let event_type = event.event_type();
        match event_type.severity() {
            Severity::Block => warn!(
                session_id = %self.session_id,
                event_type = %event_type,
                depth = self.messages.len(),
                "{}", event_type.description()
            ),
            Severity::Log => info!(
                session_id = %self.session_id,
                event_type = %event_type,
                depth = self.messages.len(),
                "{}", event_type.description()
            ),
        }
        self.events.push(event);
    }

    // =========================================================================
    // Inbound (human → model)
    // =========================================================================

    /// Record a human message unchanged
    pub fn apply_inbound_rules(&mut self, message: Message) -> Message {
        debug!(
            session_id = %self.session_id,
            role = %message.role,
            depth = self.messages.len() + 1,
            "inbound message recorded"
        );
        self.messages.push(message.clone());
        message
    }

    // =========================================================================
    // Outbound (model → human)
    // =========================================================================

    /// Filter an assistant message, record it, and return the filtered copy.
    ///
    /// Appends zero or more events; SSNZ always precedes identity fusion.
    pub fn apply_outbound_rules(&mut self, mut message: Message) -> Message {
        let original = std::mem::take(&mut message.content);
        let mut updated = original.clone();

        // 1. SSNZ: no unauthorised "we" / "us" / "our"
        if self.policy.enforces_ssnz()
            && message.is_assistant()
            && rules::contains_plural_pronouns(&original)
        {
            updated = rules::rewrite_we_to_i(&original);
            self.log_event(Event::new(
                EventType::SsnzViolation,
                [
                    (DETAIL_ORIGINAL, original.as_str()),
                    (DETAIL_UPDATED, updated.as_str()),
                ],
            ));
        }

        // 2. Identity fusion, checked on the rewritten text
        if message.is_assistant() && rules::detect_identity_fusion(&updated) {
            self.log_event(Event::new(
                EventType::IdentityFusionBlocked,
                [(DETAIL_CONTENT, updated.as_str())],
            ));
            updated = rules::identity_boundary_message().to_string();
        }

        // 3. Detect-and-log tier, content untouched
        if self.policy.heuristics_active && message.is_assistant() {
            for (event_type, phrase) in heuristics::scan(&original) {
                self.log_event(Event::new(
                    event_type,
                    [
                        (DETAIL_CONTENT, original.as_str()),
                        (DETAIL_PHRASE, phrase.as_str()),
                    ],
                ));
            }
        }

        let modified = updated != original;
        message.content = updated;
        debug!(
            session_id = %self.session_id,
            role = %message.role,
            depth = self.messages.len() + 1,
            modified,
            "outbound message recorded"
        );
        self.messages.push(message.clone());
        message
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Inject the grounding prompt once depth reaches the configured limit.
    ///
    /// Fires again on every call past the threshold, since the injected
    /// prompt itself counts toward depth.
    pub fn maybe_inject_recursion_guard(&mut self) -> Option<Message> {
        if self.messages.len() < self.policy.max_recursion_depth {
            return None;
        }
        let guard = Message::assistant(rules::recursion_return_prompt());
        self.log_event(Event::bare(EventType::RecursionReturnPrompt));
        self.messages.push(guard.clone());
        Some(guard)
    }

    // =========================================================================
    // Harness turn
    // =========================================================================

    /// One harness turn: inbound human text, outbound model text, guard check
    pub fn process_turn(&mut self, human_text: &str, raw_output: &str) -> TurnReport {
        let first_event = self.events.len();

        self.apply_inbound_rules(Message::human(human_text));
        let filtered = self.apply_outbound_rules(Message::assistant(raw_output));
        let guard = self.maybe_inject_recursion_guard();

        TurnReport {
            raw: raw_output.to_string(),
            filtered: filtered.content,
            guard,
            events: self.events[first_event..].to_vec(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
