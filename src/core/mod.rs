// Core decision logic exports
pub mod classifier;
pub mod dialogue;
pub mod journey;
pub mod ranker;
pub mod responses;
pub mod scoring;

pub use classifier::{classify, SupportCategory};
pub use dialogue::{DialogueEngine, PendingReply};
pub use journey::{acknowledge, tick, JourneyError, JourneyStateMachine, PromptResponse, TickOutcome};
pub use ranker::{rank_venues, RankResult, VenueRanker};
pub use responses::{Guidance, GuidanceReply, ResponseCatalog};
pub use scoring::calculate_compatibility_score;
