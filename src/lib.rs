//! SenseSafe - venue matching and support guidance for sensory-sensitive users
//!
//! This library provides the decision logic behind the SenseSafe app:
//! compatibility scoring and ranking of venues against a sensitivity profile,
//! rule-based triage of support messages, and the journey state machine that
//! emits prompts on the way to a venue.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{classify, rank_venues, DialogueEngine, JourneyStateMachine, SupportCategory, VenueRanker};
pub use models::{Conversation, JourneyState, ScoredVenue, SensitivityLevel, SensitivityProfile, Venue};
pub use services::VenueCatalog;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let profile = SensitivityProfile::uniform(SensitivityLevel::High);
        let ranked = rank_venues(&profile, VenueCatalog::seed().venues());
        assert_eq!(ranked.len(), 3);
    }
}
