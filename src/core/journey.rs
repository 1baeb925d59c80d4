use crate::models::{
    Destination, JourneyState, Milestone, NavigationPrompt, PromptKind, SensoryRatings, Venue,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

/// Errors returned when a journey operation is used outside its contract
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JourneyError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unknown venue: {0}")]
    UnknownVenue(String),

    #[error("Invalid rating: {0}")]
    InvalidRating(String),
}

/// Progress value at which the traveller has arrived
pub const ARRIVAL_PROGRESS: u32 = 100;

/// Progress added per tick when the caller does not specify an amount
pub const DEFAULT_TICK_AMOUNT: u32 = 2;

/// Number of narrative status lines
pub const STEP_COUNT: usize = 5;

/// Narrative status line for a step, addressed to the destination
pub fn step_message(step_index: usize, destination: &str) -> String {
    match step_index {
        0 => format!("Starting your journey to {}", destination),
        1 => "Walking towards your destination...".to_string(),
        2 => "Keep going straight, you're doing great!".to_string(),
        3 => "Almost there, just a few more minutes!".to_string(),
        _ => format!("You've arrived at {}!", destination),
    }
}

/// Step index for a progress value: floor(progress / 100 * steps), clamped
#[inline]
pub fn step_index(progress: u32) -> usize {
    let index = (progress as usize * STEP_COUNT) / ARRIVAL_PROGRESS as usize;
    index.min(STEP_COUNT - 1)
}

/// Kind and copy of the prompt a milestone emits
pub fn milestone_prompt(milestone: Milestone) -> (PromptKind, &'static str) {
    match milestone {
        Milestone::QuieterRoute => (
            PromptKind::Route,
            "Hey! There's a quieter route through the park if sound is bothering you. Would you like me to redirect?",
        ),
        Milestone::RestStop => (
            PromptKind::Suggestion,
            "I noticed a lovely quiet garden nearby if you need a break before continuing to the café. Want to take a detour?",
        ),
        Milestone::AlmostThere => (
            PromptKind::Route,
            "You're almost there! The café has confirmed they have your preferred dim lighting ready.",
        ),
    }
}

/// Traveller's answer to a milestone prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptResponse {
    Accepted,
    Declined,
}

/// Prompts produced by a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickOutcome {
    pub prompts: Vec<NavigationPrompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival: Option<NavigationPrompt>,
}

/// Accepted post-arrival feedback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackSummary {
    #[serde(rename = "venueId")]
    pub venue_id: String,
    pub rating: u8,
    #[serde(rename = "ratingLabel")]
    pub rating_label: &'static str,
    #[serde(rename = "averageSensoryRating")]
    pub average_sensory_rating: Option<f64>,
}

/// Label for an overall 1-5 experience rating
pub fn rating_label(rating: u8) -> Option<&'static str> {
    match rating {
        1 => Some("Poor experience"),
        2 => Some("Below expectations"),
        3 => Some("Good experience"),
        4 => Some("Great experience"),
        5 => Some("Excellent experience"),
        _ => None,
    }
}

/// Drives a simulated trip from `traveling` to the terminal `arrived` state
///
/// Milestones fire when progress first reaches or passes their threshold, so
/// uneven tick sizes never skip or repeat a prompt.
#[derive(Debug, Clone, Copy)]
pub struct JourneyStateMachine {
    tick_amount: u32,
}

impl Default for JourneyStateMachine {
    fn default() -> Self {
        Self {
            tick_amount: DEFAULT_TICK_AMOUNT,
        }
    }
}

impl JourneyStateMachine {
    pub fn new(tick_amount: u32) -> Self {
        Self { tick_amount }
    }

    pub fn tick_amount(&self) -> u32 {
        self.tick_amount
    }

    /// Begin a journey to the venue
    pub fn start(&self, venue: &Venue) -> JourneyState {
        tracing::info!("Starting journey to venue {}", venue.id);

        JourneyState {
            id: Uuid::new_v4(),
            destination: Destination::from(venue),
            progress: 0,
            current_step_index: 0,
            fired_milestones: BTreeSet::new(),
            pending_prompts: Vec::new(),
            arrived: false,
            started_at: Utc::now(),
        }
    }

    /// Begin a journey to the catalog venue with the given id
    pub fn start_by_id(&self, venues: &[Venue], venue_id: &str) -> Result<JourneyState, JourneyError> {
        venues
            .iter()
            .find(|v| v.id == venue_id)
            .map(|venue| self.start(venue))
            .ok_or_else(|| JourneyError::UnknownVenue(venue_id.to_string()))
    }

    /// Advance by the configured tick amount
    pub fn advance(&self, state: &mut JourneyState) -> Result<TickOutcome, JourneyError> {
        tick(state, self.tick_amount)
    }
}

/// Advance progress by `amount`, clamped at 100
///
/// Returns the milestone prompts fired by this tick and, on reaching 100, the
/// arrival notification. Ticking an arrived journey, or ticking by zero, is
/// `InvalidState` and leaves the journey unchanged.
pub fn tick(state: &mut JourneyState, amount: u32) -> Result<TickOutcome, JourneyError> {
    if state.arrived {
        return Err(JourneyError::InvalidState(format!(
            "journey {} has already arrived",
            state.id
        )));
    }
    if amount == 0 {
        return Err(JourneyError::InvalidState(format!(
            "journey {} cannot advance by zero",
            state.id
        )));
    }

    state.progress = state.progress.saturating_add(amount).min(ARRIVAL_PROGRESS);
    state.current_step_index = step_index(state.progress);

    let now = Utc::now();
    let mut outcome = TickOutcome::default();

    for milestone in Milestone::ALL {
        if state.progress < milestone.threshold() || !state.fired_milestones.insert(milestone) {
            continue;
        }

        let (kind, message) = milestone_prompt(milestone);
        let prompt = NavigationPrompt {
            milestone: Some(milestone),
            message: message.to_string(),
            kind,
            issued_at: now,
        };

        tracing::info!(
            "Journey {} reached {:?} at {}%",
            state.id,
            milestone,
            state.progress
        );

        state.pending_prompts.push(prompt.clone());
        outcome.prompts.push(prompt);
    }

    if state.progress >= ARRIVAL_PROGRESS {
        state.arrived = true;

        tracing::info!("Journey {} arrived at {}", state.id, state.destination.venue_id);

        outcome.arrival = Some(NavigationPrompt {
            milestone: None,
            message: format!(
                "Welcome to {}! Enjoy your sensory-friendly experience.",
                state.destination.name
            ),
            kind: PromptKind::Arrival,
            issued_at: now,
        });
    }

    Ok(outcome)
}

/// Dismiss a pending milestone prompt
///
/// Progress and fired milestones are untouched. Returns whether a pending
/// prompt was removed.
pub fn acknowledge(state: &mut JourneyState, milestone: Milestone, response: PromptResponse) -> bool {
    let before = state.pending_prompts.len();
    state.pending_prompts.retain(|p| p.milestone != Some(milestone));
    let removed = state.pending_prompts.len() != before;

    tracing::debug!(
        "Journey {} prompt {:?} {:?} (removed: {})",
        state.id,
        milestone,
        response,
        removed
    );

    removed
}

/// Current narrative status line
pub fn status_line(state: &JourneyState) -> String {
    step_message(state.current_step_index, &state.destination.name)
}

/// Validate and summarize feedback left after arriving
pub fn record_feedback(
    state: &JourneyState,
    rating: u8,
    sensory: &SensoryRatings,
) -> Result<FeedbackSummary, JourneyError> {
    if !state.arrived {
        return Err(JourneyError::InvalidState(format!(
            "journey {} has not arrived yet",
            state.id
        )));
    }

    let rating_label = rating_label(rating)
        .ok_or_else(|| JourneyError::InvalidRating(format!("overall rating {} not in 1-5", rating)))?;

    let given: Vec<u8> = sensory.values().into_iter().flatten().collect();
    if let Some(bad) = given.iter().find(|r| !(1..=5).contains(*r)) {
        return Err(JourneyError::InvalidRating(format!("sensory rating {} not in 1-5", bad)));
    }

    let average_sensory_rating = if given.is_empty() {
        None
    } else {
        Some(given.iter().map(|r| *r as f64).sum::<f64>() / given.len() as f64)
    };

    Ok(FeedbackSummary {
        venue_id: state.destination.venue_id.clone(),
        rating,
        rating_label,
        average_sensory_rating,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JourneyPhase, VenueFeatures};

    fn create_venue() -> Venue {
        Venue {
            id: "1".to_string(),
            name: "Quiet Corner Café".to_string(),
            address: "123 Peaceful St, Downtown".to_string(),
            rating: 4.8,
            features: VenueFeatures::all(),
            distance: 0.3,
            verified: true,
            description: String::new(),
        }
    }

    fn run_to_arrival(state: &mut JourneyState) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        while !state.arrived() {
            outcomes.push(tick(state, DEFAULT_TICK_AMOUNT).unwrap());
        }
        outcomes
    }

    #[test]
    fn test_start_state() {
        let state = JourneyStateMachine::default().start(&create_venue());

        assert_eq!(state.progress(), 0);
        assert_eq!(state.phase(), JourneyPhase::Traveling);
        assert_eq!(status_line(&state), "Starting your journey to Quiet Corner Café");
    }

    #[test]
    fn test_milestone_fires_once_across_threshold() {
        let mut state = JourneyStateMachine::default().start(&create_venue());
        tick(&mut state, 29).unwrap();

        let first = tick(&mut state, 2).unwrap();
        let second = tick(&mut state, 2).unwrap();

        assert_eq!(state.progress(), 33);
        assert_eq!(first.prompts.len(), 1);
        assert_eq!(first.prompts[0].milestone, Some(Milestone::QuieterRoute));
        assert_eq!(first.prompts[0].kind, PromptKind::Route);
        assert!(second.prompts.is_empty());
    }

    #[test]
    fn test_full_run_fires_each_milestone_once() {
        let mut state = JourneyStateMachine::default().start(&create_venue());
        let outcomes = run_to_arrival(&mut state);

        let fired: Vec<Milestone> = outcomes
            .iter()
            .flat_map(|o| o.prompts.iter().filter_map(|p| p.milestone))
            .collect();
        let arrivals = outcomes.iter().filter(|o| o.arrival.is_some()).count();

        assert_eq!(outcomes.len(), 50);
        assert_eq!(fired, Milestone::ALL.to_vec());
        assert_eq!(arrivals, 1);
        assert_eq!(state.current_step_index(), STEP_COUNT - 1);
    }

    #[test]
    fn test_large_tick_fires_all_and_clamps() {
        let mut state = JourneyStateMachine::default().start(&create_venue());

        let outcome = tick(&mut state, 250).unwrap();

        assert_eq!(state.progress(), ARRIVAL_PROGRESS);
        assert_eq!(outcome.prompts.len(), 3);
        assert_eq!(outcome.arrival.unwrap().kind, PromptKind::Arrival);
        assert!(state.arrived());
    }

    #[test]
    fn test_arrived_is_terminal() {
        let mut state = JourneyStateMachine::default().start(&create_venue());
        run_to_arrival(&mut state);

        let err = tick(&mut state, 2).unwrap_err();

        assert!(matches!(err, JourneyError::InvalidState(_)));
        assert_eq!(state.progress(), 100);
        assert_eq!(state.phase(), JourneyPhase::Arrived);
    }

    #[test]
    fn test_zero_tick_rejected() {
        let machine = JourneyStateMachine::new(0);
        let mut state = machine.start(&create_venue());
        tick(&mut state, 10).unwrap();

        assert!(matches!(
            machine.advance(&mut state),
            Err(JourneyError::InvalidState(_))
        ));
        assert_eq!(state.progress(), 10);
        assert_eq!(state.current_step_index(), 0);
    }

    #[test]
    fn test_step_index() {
        assert_eq!(step_index(0), 0);
        assert_eq!(step_index(19), 0);
        assert_eq!(step_index(20), 1);
        assert_eq!(step_index(99), 4);
        assert_eq!(step_index(100), 4);
    }

    #[test]
    fn test_acknowledge_keeps_fired_and_progress() {
        let mut state = JourneyStateMachine::default().start(&create_venue());
        tick(&mut state, 64).unwrap();
        assert_eq!(state.pending_prompts().len(), 2);

        assert!(acknowledge(&mut state, Milestone::QuieterRoute, PromptResponse::Declined));
        assert!(!acknowledge(&mut state, Milestone::QuieterRoute, PromptResponse::Declined));

        assert_eq!(state.pending_prompts().len(), 1);
        assert!(state.fired_milestones().contains(&Milestone::QuieterRoute));
        assert_eq!(state.progress(), 64);

        // already fired, so crossing more ground never re-emits it
        let outcome = tick(&mut state, 2).unwrap();
        assert!(outcome.prompts.is_empty());
    }

    #[test]
    fn test_start_by_unknown_id() {
        let machine = JourneyStateMachine::default();
        let venues = vec![create_venue()];

        assert!(machine.start_by_id(&venues, "1").is_ok());
        assert_eq!(
            machine.start_by_id(&venues, "nope").unwrap_err(),
            JourneyError::UnknownVenue("nope".to_string())
        );
    }

    #[test]
    fn test_feedback_requires_arrival() {
        let mut state = JourneyStateMachine::default().start(&create_venue());
        let sensory = SensoryRatings {
            lighting: Some(5),
            sound: Some(4),
            ..Default::default()
        };

        assert!(matches!(
            record_feedback(&state, 5, &sensory),
            Err(JourneyError::InvalidState(_))
        ));

        run_to_arrival(&mut state);
        let summary = record_feedback(&state, 5, &sensory).unwrap();

        assert_eq!(summary.rating_label, "Excellent experience");
        assert_eq!(summary.average_sensory_rating, Some(4.5));
        assert!(matches!(
            record_feedback(&state, 0, &sensory),
            Err(JourneyError::InvalidRating(_))
        ));
    }
}
