//! Core modules for Flare

pub mod rules;
pub mod heuristics;
pub mod session;
pub mod policy;

pub use rules::{
    contains_plural_pronouns, rewrite_we_to_i, detect_identity_fusion, matched_fusion_phrase,
    identity_boundary_message, recursion_return_prompt,
};
pub use heuristics::{detect_temporal_binding, detect_rescue_charge, detect_projection_vector};
pub use session::FlareSession;
pub use policy::{load_policy, save_policy};
