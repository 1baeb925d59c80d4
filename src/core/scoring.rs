use crate::models::{MatchBand, SensitivityLevel, SensitivityProfile, SensoryAxis, Venue, VenueFeature};

/// Points an axis contributes when the venue accommodates it
pub const AXIS_WEIGHT: u8 = 2;

/// Highest score any venue can reach
pub const MAX_SCORE: u8 = AXIS_WEIGHT * SensoryAxis::ALL.len() as u8;

/// The venue feature that accommodates an axis
pub fn protective_feature(axis: SensoryAxis) -> VenueFeature {
    match axis {
        SensoryAxis::Light => VenueFeature::DimLighting,
        SensoryAxis::Sound => VenueFeature::QuietZone,
        SensoryAxis::Crowd => VenueFeature::LowCrowd,
        SensoryAxis::Smell => VenueFeature::NoStrongSmells,
        SensoryAxis::Motion => VenueFeature::StableSeating,
        SensoryAxis::Temperature => VenueFeature::ClimateControlled,
    }
}

/// The profile level at which an axis starts seeking accommodation
///
/// Crowd is rated as tolerance rather than sensitivity, so it triggers on
/// `Low` while every other axis triggers on `High`.
pub fn trigger_level(axis: SensoryAxis) -> SensitivityLevel {
    match axis {
        SensoryAxis::Crowd => SensitivityLevel::Low,
        _ => SensitivityLevel::High,
    }
}

#[inline]
fn is_accommodated(profile: &SensitivityProfile, venue: &Venue, axis: SensoryAxis) -> bool {
    profile.level(axis) == Some(trigger_level(axis)) && venue.features.has(protective_feature(axis))
}

/// Calculate the compatibility score (0-12, even) of a venue for a profile
///
/// Each axis at its trigger level adds [`AXIS_WEIGHT`] when the venue exposes
/// the matching feature. Unset axes contribute nothing.
#[inline]
pub fn calculate_compatibility_score(profile: &SensitivityProfile, venue: &Venue) -> u8 {
    SensoryAxis::ALL
        .iter()
        .filter(|axis| is_accommodated(profile, venue, **axis))
        .map(|_| AXIS_WEIGHT)
        .sum()
}

/// Axes of the profile that this venue accommodates
pub fn accommodated_axes(profile: &SensitivityProfile, venue: &Venue) -> Vec<SensoryAxis> {
    SensoryAxis::ALL
        .into_iter()
        .filter(|axis| is_accommodated(profile, venue, *axis))
        .collect()
}

#[inline]
pub fn match_band(score: u8) -> MatchBand {
    MatchBand::from_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VenueFeatures;
    use SensitivityLevel::*;

    fn create_test_venue(features: VenueFeatures) -> Venue {
        Venue {
            id: "v1".to_string(),
            name: "Test Venue".to_string(),
            address: "1 Test St".to_string(),
            rating: 4.5,
            features,
            distance: 1.0,
            verified: true,
            description: String::new(),
        }
    }

    #[test]
    fn test_high_everywhere_full_venue() {
        let profile = SensitivityProfile::uniform(High).with(SensoryAxis::Crowd, Low);
        let venue = create_test_venue(VenueFeatures::all());

        assert_eq!(calculate_compatibility_score(&profile, &venue), MAX_SCORE);
    }

    #[test]
    fn test_medium_never_scores() {
        let profile = SensitivityProfile::uniform(Medium);
        let venue = create_test_venue(VenueFeatures::all());

        assert_eq!(calculate_compatibility_score(&profile, &venue), 0);
    }

    #[test]
    fn test_crowd_triggers_on_low_tolerance() {
        let venue = create_test_venue(VenueFeatures::default().with(VenueFeature::LowCrowd, true));

        let low = SensitivityProfile::uniform(Medium).with(SensoryAxis::Crowd, Low);
        let high = SensitivityProfile::uniform(Medium).with(SensoryAxis::Crowd, High);

        assert_eq!(calculate_compatibility_score(&low, &venue), 2);
        assert_eq!(calculate_compatibility_score(&high, &venue), 0);
    }

    #[test]
    fn test_other_axes_trigger_on_high() {
        for axis in SensoryAxis::ALL.into_iter().filter(|a| *a != SensoryAxis::Crowd) {
            let venue = create_test_venue(VenueFeatures::default().with(protective_feature(axis), true));

            let high = SensitivityProfile::uniform(Medium).with(axis, High);
            let low = SensitivityProfile::uniform(Medium).with(axis, Low);

            assert_eq!(calculate_compatibility_score(&high, &venue), 2, "{:?}", axis);
            assert_eq!(calculate_compatibility_score(&low, &venue), 0, "{:?}", axis);
        }
    }

    #[test]
    fn test_unset_axis_contributes_nothing() {
        let profile = SensitivityProfile::default().with(SensoryAxis::Light, High);
        let venue = create_test_venue(VenueFeatures::all());

        assert_eq!(calculate_compatibility_score(&profile, &venue), 2);
        assert_eq!(accommodated_axes(&profile, &venue), vec![SensoryAxis::Light]);
    }

    #[test]
    fn test_match_bands() {
        assert_eq!(match_band(12), MatchBand::Perfect);
        assert_eq!(match_band(8), MatchBand::Perfect);
        assert_eq!(match_band(6), MatchBand::Great);
        assert_eq!(match_band(4), MatchBand::Good);
        assert_eq!(match_band(2), MatchBand::Fair);
        assert_eq!(match_band(0).label(), "Fair Match");
    }
}
