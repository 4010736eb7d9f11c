//! Per-turn report for terminal and JSON display

use colored::Colorize;
use serde::Serialize;

use crate::types::{Event, Message};

/// What one harness turn produced
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    /// Model output as received
    pub raw: String,
    /// Model output after the outbound pipeline
    pub filtered: String,
    /// Guard prompt, if the depth threshold was reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard: Option<Message>,
    /// Events appended during this turn, in order
    pub events: Vec<Event>,
}

impl TurnReport {
    /// True when the filtered text differs from what the model produced
    pub fn modified(&self) -> bool {
        self.raw != self.filtered
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n{}\n", "=== RAW MODEL OUTPUT ===".bold(), self.raw));

        let filtered = if self.modified() {
            self.filtered.green().to_string()
        } else {
            self.filtered.clone()
        };
        out.push_str(&format!("\n{}\n{}\n", "=== FLARE-FILTERED OUTPUT ===".bold(), filtered));

        if let Some(guard) = &self.guard {
            out.push_str(&format!(
                "\n{}\n{}\n",
                "=== RECURSION GUARD INJECTED ===".bold().cyan(),
                guard.content
            ));
        }

        out.push_str(&format!("\n{}\n", "=== EVENT LOG ===".bold()));
        for event in &self.events {
            let kind = event.event_type();
            out.push_str(&format!("{}\n", event.to_parseable_string().color(kind.color())));
        }
        out
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== RAW MODEL OUTPUT ===\n{}\n", self.raw));
        out.push_str(&format!("\n=== FLARE-FILTERED OUTPUT ===\n{}\n", self.filtered));
        if let Some(guard) = &self.guard {
            out.push_str(&format!("\n=== RECURSION GUARD INJECTED ===\n{}\n", guard.content));
        }
        out.push_str("\n=== EVENT LOG ===\n");
        for event in &self.events {
            out.push_str(&event.to_parseable_string());
            out.push('\n');
        }
        out
    }
}
