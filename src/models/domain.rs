use crate::core::journey::{step_index, ARRIVAL_PROGRESS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

/// Client-supplied session state that breaks a model invariant
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSessionState {
    #[error("turn id {id} does not follow {previous}")]
    TurnOrder { previous: u64, id: u64 },

    #[error("turn id {0} leaves no room for further turns")]
    TurnIdExhausted(u64),

    #[error("progress {0} is above 100")]
    ProgressOutOfRange(u32),

    #[error("arrived is {arrived} at progress {progress}")]
    ArrivalMismatch { arrived: bool, progress: u32 },

    #[error("step index {step} does not match progress {progress}")]
    StepMismatch { step: usize, progress: u32 },

    #[error("fired milestones do not match progress {0}")]
    MilestoneMismatch(u32),

    #[error("pending prompt for a milestone that has not fired")]
    UnfiredPrompt,
}

/// Ordered three-level tolerance rating for a single sensory axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityLevel {
    Low,
    Medium,
    High,
}

/// The six independent dimensions a user rates during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensoryAxis {
    Light,
    Sound,
    Crowd,
    Smell,
    Motion,
    Temperature,
}

impl SensoryAxis {
    pub const ALL: [SensoryAxis; 6] = [
        SensoryAxis::Light,
        SensoryAxis::Sound,
        SensoryAxis::Crowd,
        SensoryAxis::Smell,
        SensoryAxis::Motion,
        SensoryAxis::Temperature,
    ];
}

/// User's sensitivity levels, collected once per session
///
/// An axis left unset (`None`) never contributes to a compatibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensitivityProfile {
    #[serde(rename = "lightSensitivity", default)]
    light: Option<SensitivityLevel>,
    #[serde(rename = "soundSensitivity", default)]
    sound: Option<SensitivityLevel>,
    #[serde(rename = "crowdTolerance", default)]
    crowd: Option<SensitivityLevel>,
    #[serde(rename = "smellSensitivity", default)]
    smell: Option<SensitivityLevel>,
    #[serde(rename = "motionSensitivity", default)]
    motion: Option<SensitivityLevel>,
    #[serde(rename = "temperatureSensitivity", default)]
    temperature: Option<SensitivityLevel>,
}

impl SensitivityProfile {
    pub fn new(
        light: SensitivityLevel,
        sound: SensitivityLevel,
        crowd: SensitivityLevel,
        smell: SensitivityLevel,
        motion: SensitivityLevel,
        temperature: SensitivityLevel,
    ) -> Self {
        Self {
            light: Some(light),
            sound: Some(sound),
            crowd: Some(crowd),
            smell: Some(smell),
            motion: Some(motion),
            temperature: Some(temperature),
        }
    }

    /// Profile with every axis set to the same level
    pub fn uniform(level: SensitivityLevel) -> Self {
        Self::new(level, level, level, level, level, level)
    }

    /// Return a copy of this profile with one axis replaced
    pub fn with(mut self, axis: SensoryAxis, level: SensitivityLevel) -> Self {
        let slot = match axis {
            SensoryAxis::Light => &mut self.light,
            SensoryAxis::Sound => &mut self.sound,
            SensoryAxis::Crowd => &mut self.crowd,
            SensoryAxis::Smell => &mut self.smell,
            SensoryAxis::Motion => &mut self.motion,
            SensoryAxis::Temperature => &mut self.temperature,
        };
        *slot = Some(level);
        self
    }

    pub fn level(&self, axis: SensoryAxis) -> Option<SensitivityLevel> {
        match axis {
            SensoryAxis::Light => self.light,
            SensoryAxis::Sound => self.sound,
            SensoryAxis::Crowd => self.crowd,
            SensoryAxis::Smell => self.smell,
            SensoryAxis::Motion => self.motion,
            SensoryAxis::Temperature => self.temperature,
        }
    }

    /// True when every axis has been answered
    pub fn is_complete(&self) -> bool {
        SensoryAxis::ALL.iter().all(|axis| self.level(*axis).is_some())
    }
}

/// Protective features a venue can advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VenueFeature {
    DimLighting,
    QuietZone,
    LowCrowd,
    NoStrongSmells,
    StableSeating,
    ClimateControlled,
}

impl VenueFeature {
    pub const ALL: [VenueFeature; 6] = [
        VenueFeature::DimLighting,
        VenueFeature::QuietZone,
        VenueFeature::LowCrowd,
        VenueFeature::NoStrongSmells,
        VenueFeature::StableSeating,
        VenueFeature::ClimateControlled,
    ];

    /// Badge text shown next to a venue
    pub fn label(&self) -> &'static str {
        match self {
            VenueFeature::DimLighting => "Dim Lighting",
            VenueFeature::QuietZone => "Quiet Zone",
            VenueFeature::LowCrowd => "Low Crowd",
            VenueFeature::NoStrongSmells => "No Strong Smells",
            VenueFeature::StableSeating => "Stable Seating",
            VenueFeature::ClimateControlled => "Climate Controlled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VenueFeatures {
    #[serde(rename = "dimLighting", default)]
    pub dim_lighting: bool,
    #[serde(rename = "quietZone", default)]
    pub quiet_zone: bool,
    #[serde(rename = "lowCrowd", default)]
    pub low_crowd: bool,
    #[serde(rename = "noStrongSmells", default)]
    pub no_strong_smells: bool,
    #[serde(rename = "stableSeating", default)]
    pub stable_seating: bool,
    #[serde(rename = "climateControlled", default)]
    pub climate_controlled: bool,
}

impl VenueFeatures {
    pub fn all() -> Self {
        Self {
            dim_lighting: true,
            quiet_zone: true,
            low_crowd: true,
            no_strong_smells: true,
            stable_seating: true,
            climate_controlled: true,
        }
    }

    pub fn has(&self, feature: VenueFeature) -> bool {
        match feature {
            VenueFeature::DimLighting => self.dim_lighting,
            VenueFeature::QuietZone => self.quiet_zone,
            VenueFeature::LowCrowd => self.low_crowd,
            VenueFeature::NoStrongSmells => self.no_strong_smells,
            VenueFeature::StableSeating => self.stable_seating,
            VenueFeature::ClimateControlled => self.climate_controlled,
        }
    }

    pub fn with(mut self, feature: VenueFeature, enabled: bool) -> Self {
        let slot = match feature {
            VenueFeature::DimLighting => &mut self.dim_lighting,
            VenueFeature::QuietZone => &mut self.quiet_zone,
            VenueFeature::LowCrowd => &mut self.low_crowd,
            VenueFeature::NoStrongSmells => &mut self.no_strong_smells,
            VenueFeature::StableSeating => &mut self.stable_seating,
            VenueFeature::ClimateControlled => &mut self.climate_controlled,
        };
        *slot = enabled;
        self
    }

    /// Enabled features in display order
    pub fn enabled(&self) -> impl Iterator<Item = VenueFeature> + '_ {
        VenueFeature::ALL.into_iter().filter(|feature| self.has(*feature))
    }
}

/// A sensory-friendly venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: f64,
    #[serde(default)]
    pub features: VenueFeatures,
    /// Distance from the user in kilometers
    pub distance: f64,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub description: String,
}

impl Venue {
    pub fn feature_labels(&self) -> Vec<String> {
        self.features
            .enabled()
            .map(|feature| feature.label().to_string())
            .collect()
    }
}

/// Display band for a compatibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchBand {
    Fair,
    Good,
    Great,
    Perfect,
}

impl MatchBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 8 => MatchBand::Perfect,
            s if s >= 6 => MatchBand::Great,
            s if s >= 4 => MatchBand::Good,
            _ => MatchBand::Fair,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchBand::Perfect => "Perfect Match",
            MatchBand::Great => "Great Match",
            MatchBand::Good => "Good Match",
            MatchBand::Fair => "Fair Match",
        }
    }
}

/// Venue with a compatibility score computed for one ranking request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVenue {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(rename = "preferenceScore")]
    pub preference_score: u8,
    #[serde(rename = "matchBand")]
    pub match_band: MatchBand,
    #[serde(rename = "featureLabels")]
    pub feature_labels: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

/// One message in the support dialogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: u64,
    pub text: String,
    pub origin: Origin,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Highest turn id accepted from a client, leaving ids for further turns
pub const MAX_TURN_ID: u64 = u64::MAX / 2;

/// Append-only, ordered dialogue history
///
/// Turn ids strictly increase. Deserialized conversations are checked for
/// that and must stay at or below [`MAX_TURN_ID`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConversation")]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

#[derive(Deserialize)]
struct RawConversation {
    #[serde(default)]
    turns: Vec<ConversationTurn>,
}

impl TryFrom<RawConversation> for Conversation {
    type Error = InvalidSessionState;

    fn try_from(raw: RawConversation) -> Result<Self, Self::Error> {
        for pair in raw.turns.windows(2) {
            if pair[1].id <= pair[0].id {
                return Err(InvalidSessionState::TurnOrder {
                    previous: pair[0].id,
                    id: pair[1].id,
                });
            }
        }

        if let Some(last) = raw.turns.last() {
            if last.id > MAX_TURN_ID {
                return Err(InvalidSessionState::TurnIdExhausted(last.id));
            }
        }

        Ok(Self { turns: raw.turns })
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn last_assistant_turn(&self) -> Option<&ConversationTurn> {
        self.turns.iter().rev().find(|t| t.origin == Origin::Assistant)
    }

    fn next_id(&self) -> u64 {
        // ids above MAX_TURN_ID are rejected on the way in
        self.turns
            .last()
            .map(|t| t.id.checked_add(1).unwrap_or(u64::MAX))
            .unwrap_or(1)
    }

    pub(crate) fn append(
        &mut self,
        origin: Origin,
        text: String,
        suggestions: Option<Vec<String>>,
    ) -> &ConversationTurn {
        let turn = ConversationTurn {
            id: self.next_id(),
            text,
            origin,
            timestamp: Utc::now(),
            suggestions,
        };
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }
}

/// Journey progress threshold at which a contextual prompt fires once
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    QuieterRoute,
    RestStop,
    AlmostThere,
}

impl Milestone {
    /// Milestones in ascending threshold order
    pub const ALL: [Milestone; 3] = [
        Milestone::QuieterRoute,
        Milestone::RestStop,
        Milestone::AlmostThere,
    ];

    pub fn threshold(&self) -> u32 {
        match self {
            Milestone::QuieterRoute => 30,
            Milestone::RestStop => 60,
            Milestone::AlmostThere => 90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    Route,
    Suggestion,
    Arrival,
}

/// Message surfaced to the traveller during a journey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationPrompt {
    /// Absent for the arrival notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,
    pub message: String,
    pub kind: PromptKind,
    #[serde(rename = "issuedAt")]
    pub issued_at: DateTime<Utc>,
}

/// The venue a journey is heading to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(rename = "venueId")]
    pub venue_id: String,
    pub name: String,
    pub address: String,
}

impl From<&Venue> for Destination {
    fn from(venue: &Venue) -> Self {
        Self {
            venue_id: venue.id.clone(),
            name: venue.name.clone(),
            address: venue.address.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyPhase {
    Traveling,
    Arrived,
}

/// Progress of one simulated trip
///
/// `fired_milestones` only grows and `arrived` is terminal; both are only
/// mutated by the journey state machine. A deserialized state must be one the
/// state machine could have produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawJourneyState")]
pub struct JourneyState {
    pub(crate) id: Uuid,
    pub(crate) destination: Destination,
    pub(crate) progress: u32,
    #[serde(rename = "currentStepIndex")]
    pub(crate) current_step_index: usize,
    #[serde(rename = "firedMilestones", default)]
    pub(crate) fired_milestones: BTreeSet<Milestone>,
    #[serde(rename = "pendingPrompts", default)]
    pub(crate) pending_prompts: Vec<NavigationPrompt>,
    pub(crate) arrived: bool,
    #[serde(rename = "startedAt")]
    pub(crate) started_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawJourneyState {
    id: Uuid,
    destination: Destination,
    progress: u32,
    #[serde(rename = "currentStepIndex")]
    current_step_index: usize,
    #[serde(rename = "firedMilestones", default)]
    fired_milestones: BTreeSet<Milestone>,
    #[serde(rename = "pendingPrompts", default)]
    pending_prompts: Vec<NavigationPrompt>,
    arrived: bool,
    #[serde(rename = "startedAt")]
    started_at: DateTime<Utc>,
}

impl TryFrom<RawJourneyState> for JourneyState {
    type Error = InvalidSessionState;

    fn try_from(raw: RawJourneyState) -> Result<Self, Self::Error> {
        let progress = raw.progress;

        if progress > ARRIVAL_PROGRESS {
            return Err(InvalidSessionState::ProgressOutOfRange(progress));
        }
        if raw.arrived != (progress == ARRIVAL_PROGRESS) {
            return Err(InvalidSessionState::ArrivalMismatch {
                arrived: raw.arrived,
                progress,
            });
        }
        if raw.current_step_index != step_index(progress) {
            return Err(InvalidSessionState::StepMismatch {
                step: raw.current_step_index,
                progress,
            });
        }

        let expected: BTreeSet<Milestone> = Milestone::ALL
            .into_iter()
            .filter(|m| m.threshold() <= progress)
            .collect();
        if raw.fired_milestones != expected {
            return Err(InvalidSessionState::MilestoneMismatch(progress));
        }

        let unfired = raw.pending_prompts.iter().any(|p| match p.milestone {
            Some(m) => !raw.fired_milestones.contains(&m),
            None => true,
        });
        if unfired {
            return Err(InvalidSessionState::UnfiredPrompt);
        }

        Ok(Self {
            id: raw.id,
            destination: raw.destination,
            progress,
            current_step_index: raw.current_step_index,
            fired_milestones: raw.fired_milestones,
            pending_prompts: raw.pending_prompts,
            arrived: raw.arrived,
            started_at: raw.started_at,
        })
    }
}

impl JourneyState {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn fired_milestones(&self) -> &BTreeSet<Milestone> {
        &self.fired_milestones
    }

    pub fn pending_prompts(&self) -> &[NavigationPrompt] {
        &self.pending_prompts
    }

    pub fn arrived(&self) -> bool {
        self.arrived
    }

    pub fn phase(&self) -> JourneyPhase {
        if self.arrived {
            JourneyPhase::Arrived
        } else {
            JourneyPhase::Traveling
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// Optional per-sense ratings left after a visit (1-5 each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensoryRatings {
    #[serde(default)]
    pub lighting: Option<u8>,
    #[serde(default)]
    pub sound: Option<u8>,
    #[serde(default)]
    pub crowd: Option<u8>,
    #[serde(default)]
    pub smell: Option<u8>,
    #[serde(default)]
    pub comfort: Option<u8>,
}

impl SensoryRatings {
    pub fn values(&self) -> [Option<u8>; 5] {
        [self.lighting, self.sound, self.crowd, self.smell, self.comfort]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::journey::{tick, JourneyStateMachine};
    use serde_json::{json, Value};

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

    fn journey_json(progress: u32) -> Value {
        let mut state = JourneyStateMachine::default().start(&create_venue());
        if progress > 0 {
            tick(&mut state, progress).unwrap();
        }
        serde_json::to_value(&state).unwrap()
    }

    fn parse_journey(value: Value) -> Result<JourneyState, serde_json::Error> {
        serde_json::from_value(value)
    }

    fn turn(id: u64) -> Value {
        json!({
            "id": id,
            "text": "hello",
            "origin": "user",
            "timestamp": "2024-05-01T10:00:00Z"
        })
    }

    #[test]
    fn test_journey_round_trip() {
        for progress in [0, 31, 64, 100] {
            let parsed = parse_journey(journey_json(progress)).unwrap();
            assert_eq!(parsed.progress(), progress);
        }
    }

    #[test]
    fn test_journey_progress_out_of_range_rejected() {
        let mut value = journey_json(10);
        value["progress"] = json!(4_000_000_000u32);

        assert!(parse_journey(value).is_err());
    }

    #[test]
    fn test_journey_early_arrival_rejected() {
        let mut value = journey_json(10);
        value["arrived"] = json!(true);

        assert!(parse_journey(value).is_err());
    }

    #[test]
    fn test_journey_step_mismatch_rejected() {
        let mut value = journey_json(10);
        value["currentStepIndex"] = json!(3);

        assert!(parse_journey(value).is_err());
    }

    #[test]
    fn test_journey_milestones_must_match_progress() {
        let mut skipped = journey_json(64);
        skipped["firedMilestones"] = json!(["quieter_route"]);
        assert!(parse_journey(skipped).is_err());

        let mut early = journey_json(10);
        early["firedMilestones"] = json!(["almost_there"]);
        assert!(parse_journey(early).is_err());
    }

    #[test]
    fn test_conversation_ids_must_increase() {
        let value = json!({ "turns": [turn(2), turn(2)] });
        let err = serde_json::from_value::<Conversation>(value).unwrap_err();

        assert!(err.to_string().contains("does not follow"));
    }

    #[test]
    fn test_conversation_id_headroom() {
        let exhausted = json!({ "turns": [turn(u64::MAX)] });
        assert!(serde_json::from_value::<Conversation>(exhausted).is_err());

        let at_limit = json!({ "turns": [turn(MAX_TURN_ID)] });
        let conversation: Conversation = serde_json::from_value(at_limit).unwrap();
        assert_eq!(conversation.len(), 1);
    }
}
