use crate::models::{Venue, VenueFeatures};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a venue catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate venue id: {0}")]
    DuplicateId(String),

    #[error("Venue {id} has rating {rating} outside 0-5")]
    InvalidRating { id: String, rating: f64 },

    #[error("Venue {id} has invalid distance {distance}")]
    InvalidDistance { id: String, distance: f64 },
}

/// On-disk catalog layout
///
/// ```toml
/// [[venues]]
/// id = "1"
/// name = "Quiet Corner Café"
/// address = "123 Peaceful St, Downtown"
/// rating = 4.8
/// distance = 0.3
/// verified = true
///
/// [venues.features]
/// dimLighting = true
/// ```
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    venues: Vec<Venue>,
}

/// Read-only set of venues injected into ranking and journey handlers
#[derive(Debug, Clone, Default)]
pub struct VenueCatalog {
    venues: Vec<Venue>,
}

impl VenueCatalog {
    /// Build a catalog, rejecting duplicate ids and out-of-range values
    pub fn new(venues: Vec<Venue>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();

        for venue in &venues {
            if !seen.insert(venue.id.as_str()) {
                return Err(CatalogError::DuplicateId(venue.id.clone()));
            }
            if !(0.0..=5.0).contains(&venue.rating) {
                return Err(CatalogError::InvalidRating {
                    id: venue.id.clone(),
                    rating: venue.rating,
                });
            }
            if !venue.distance.is_finite() || venue.distance < 0.0 {
                return Err(CatalogError::InvalidDistance {
                    id: venue.id.clone(),
                    distance: venue.distance,
                });
            }
        }

        Ok(Self { venues })
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        Self::new(file.venues)
    }

    /// Load a catalog from a TOML file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        let catalog = Self::from_toml_str(&contents)?;

        tracing::info!(
            "Loaded {} venues from {}",
            catalog.len(),
            path.as_ref().display()
        );

        Ok(catalog)
    }

    /// Built-in catalog used when no file is configured
    pub fn seed() -> Self {
        let mut gentle_grounds = VenueFeatures::all();
        gentle_grounds.no_strong_smells = false;

        Self {
            venues: vec![
                Venue {
                    id: "1".to_string(),
                    name: "Quiet Corner Café".to_string(),
                    address: "123 Peaceful St, Downtown".to_string(),
                    rating: 4.8,
                    features: VenueFeatures::all(),
                    distance: 0.3,
                    verified: true,
                    description: "A serene café perfect for sensitive souls".to_string(),
                },
                Venue {
                    id: "2".to_string(),
                    name: "Gentle Grounds".to_string(),
                    address: "456 Calm Ave, Midtown".to_string(),
                    rating: 4.6,
                    features: gentle_grounds,
                    distance: 0.7,
                    verified: true,
                    description: "Cozy atmosphere with sensory-friendly design".to_string(),
                },
                Venue {
                    id: "3".to_string(),
                    name: "Soft Space Coffee".to_string(),
                    address: "789 Comfort Blvd, Uptown".to_string(),
                    rating: 4.9,
                    features: VenueFeatures::all(),
                    distance: 1.2,
                    verified: true,
                    description: "Thoughtfully designed for sensory comfort".to_string(),
                },
            ],
        }
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn get(&self, id: &str) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == id)
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[venues]]
id = "a"
name = "Hush House"
address = "1 Low St"
rating = 4.2
distance = 0.9
verified = true

[venues.features]
dimLighting = true
quietZone = true

[[venues]]
id = "b"
name = "Still Water"
address = "2 Calm Rd"
rating = 3.9
distance = 2.5
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = VenueCatalog::from_toml_str(SAMPLE).unwrap();

        assert_eq!(catalog.len(), 2);
        let hush = catalog.get("a").unwrap();
        assert!(hush.features.dim_lighting);
        assert!(!hush.features.low_crowd);
        assert!(!catalog.get("b").unwrap().verified);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let doubled = SAMPLE.replace("id = \"b\"", "id = \"a\"");
        let err = VenueCatalog::from_toml_str(&doubled).unwrap_err();

        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let bad = SAMPLE.replace("rating = 4.2", "rating = 7.0");

        assert!(matches!(
            VenueCatalog::from_toml_str(&bad),
            Err(CatalogError::InvalidRating { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("sensesafe-catalog-{}.toml", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let catalog = VenueCatalog::load(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(matches!(
            VenueCatalog::load(&path).await,
            Err(CatalogError::Io(_))
        ));
    }

    #[test]
    fn test_seed_catalog() {
        let catalog = VenueCatalog::seed();

        assert_eq!(catalog.len(), 3);
        assert!(!catalog.get("2").unwrap().features.no_strong_smells);
        assert!(VenueCatalog::new(catalog.venues().to_vec()).is_ok());
    }
}
