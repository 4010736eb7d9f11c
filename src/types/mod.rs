//! Core types for Flare

mod message;
mod event;
mod policy;
mod report;
mod error;

pub use message::{Message, Role};
pub use event::{Event, EventType, Severity};
pub use policy::{ConsentLevel, SessionPolicy};
pub use report::TurnReport;
pub use error::{FlareError, FlareResult};
