use crate::core::scoring::{calculate_compatibility_score, match_band};
use crate::models::{ScoredVenue, SensitivityProfile, Venue};
use std::cmp::Ordering;

/// Result of a ranking request
#[derive(Debug)]
pub struct RankResult {
    pub venues: Vec<ScoredVenue>,
    pub total_venues: usize,
}

/// Score every venue for the profile and order them best first
///
/// Ordering is score descending, then distance ascending. The sort is stable,
/// so venues that tie on both keep their catalog order. Nothing is cached: the
/// result is a fresh snapshot of the catalog passed in.
pub fn rank_venues(profile: &SensitivityProfile, venues: &[Venue]) -> Vec<ScoredVenue> {
    let mut scored: Vec<ScoredVenue> = venues
        .iter()
        .map(|venue| {
            let score = calculate_compatibility_score(profile, venue);
            ScoredVenue {
                feature_labels: venue.feature_labels(),
                venue: venue.clone(),
                preference_score: score,
                match_band: match_band(score),
            }
        })
        .collect();

    // `sort_by` is stable
    scored.sort_by(|a, b| {
        b.preference_score
            .cmp(&a.preference_score)
            .then_with(|| {
                a.venue
                    .distance
                    .partial_cmp(&b.venue.distance)
                    .unwrap_or(Ordering::Equal)
            })
    });

    scored
}

/// Ranking front-end that applies the configured result cap
#[derive(Debug, Clone, Default)]
pub struct VenueRanker {
    max_results: Option<usize>,
}

impl VenueRanker {
    pub fn new(max_results: Option<usize>) -> Self {
        Self { max_results }
    }

    pub fn rank(&self, profile: &SensitivityProfile, venues: &[Venue]) -> RankResult {
        let total_venues = venues.len();
        let mut ranked = rank_venues(profile, venues);

        if let Some(limit) = self.max_results {
            ranked.truncate(limit);
        }

        tracing::debug!(
            "Ranked {} venues, top score {:?}",
            total_venues,
            ranked.first().map(|v| v.preference_score)
        );

        RankResult {
            venues: ranked,
            total_venues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SensitivityLevel, VenueFeatures};

    fn create_venue(id: &str, distance: f64, features: VenueFeatures) -> Venue {
        Venue {
            id: id.to_string(),
            name: format!("Venue {}", id),
            address: "Somewhere".to_string(),
            rating: 4.0,
            features,
            distance,
            verified: false,
            description: String::new(),
        }
    }

    fn quiet_only() -> VenueFeatures {
        VenueFeatures {
            quiet_zone: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_sorted_by_score_then_distance() {
        let profile = SensitivityProfile::uniform(SensitivityLevel::High);
        let venues = vec![
            create_venue("far-quiet", 2.0, quiet_only()),
            create_venue("plain", 0.1, VenueFeatures::default()),
            create_venue("near-quiet", 0.5, quiet_only()),
            create_venue("full", 5.0, VenueFeatures::all()),
        ];

        let ranked = rank_venues(&profile, &venues);
        let ids: Vec<&str> = ranked.iter().map(|v| v.venue.id.as_str()).collect();

        assert_eq!(ids, vec!["full", "near-quiet", "far-quiet", "plain"]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let profile = SensitivityProfile::uniform(SensitivityLevel::High);
        let venues = vec![
            create_venue("b", 1.0, quiet_only()),
            create_venue("a", 1.0, quiet_only()),
            create_venue("c", 1.0, quiet_only()),
        ];

        let ranked = rank_venues(&profile, &venues);
        let ids: Vec<&str> = ranked.iter().map(|v| v.venue.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_catalog() {
        let ranker = VenueRanker::default();
        let result = ranker.rank(&SensitivityProfile::default(), &[]);

        assert!(result.venues.is_empty());
        assert_eq!(result.total_venues, 0);
    }

    #[test]
    fn test_respects_limit() {
        let ranker = VenueRanker::new(Some(2));
        let venues: Vec<Venue> = (0..5)
            .map(|i| create_venue(&i.to_string(), i as f64, VenueFeatures::default()))
            .collect();

        let result = ranker.rank(&SensitivityProfile::default(), &venues);

        assert_eq!(result.venues.len(), 2);
        assert_eq!(result.total_venues, 5);
    }
}
