use serde::{Deserialize, Serialize};
use std::fmt;

/// Support category a free-text message is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportCategory {
    Anxiety,
    Sounds,
    Crowds,
    Lights,
    Grounding,
    Public,
    Unknown,
}

impl SupportCategory {
    pub const ALL: [SupportCategory; 7] = [
        SupportCategory::Anxiety,
        SupportCategory::Sounds,
        SupportCategory::Crowds,
        SupportCategory::Lights,
        SupportCategory::Grounding,
        SupportCategory::Public,
        SupportCategory::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportCategory::Anxiety => "anxiety",
            SupportCategory::Sounds => "sounds",
            SupportCategory::Crowds => "crowds",
            SupportCategory::Lights => "lights",
            SupportCategory::Grounding => "grounding",
            SupportCategory::Public => "public",
            SupportCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SupportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword table in priority order. The first category with any keyword
/// contained in the lowercased text wins.
pub const KEYWORD_TABLE: &[(SupportCategory, &[&str])] = &[
    (SupportCategory::Anxiety, &["anxious", "anxiety", "worried"]),
    (SupportCategory::Sounds, &["sound", "noise", "loud"]),
    (SupportCategory::Crowds, &["crowd", "people", "busy"]),
    (SupportCategory::Lights, &["light", "bright", "fluorescent"]),
    (SupportCategory::Grounding, &["grounding"]),
    (SupportCategory::Public, &["public"]),
];

/// Classify free text into a support category
///
/// Case-insensitive substring match over [`KEYWORD_TABLE`]; text matching
/// nothing is `Unknown`.
pub fn classify(text: &str) -> SupportCategory {
    let lower = text.to_lowercase();

    let category = KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(SupportCategory::Unknown);

    tracing::debug!("Classified message as {}", category);
    category
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_category_keyword() {
        assert_eq!(classify("I'm so worried"), SupportCategory::Anxiety);
        assert_eq!(classify("it is really LOUD here"), SupportCategory::Sounds);
        assert_eq!(classify("too many people"), SupportCategory::Crowds);
        assert_eq!(classify("Fluorescent tubes everywhere"), SupportCategory::Lights);
        assert_eq!(classify("grounding please"), SupportCategory::Grounding);
        assert_eq!(classify("in public"), SupportCategory::Public);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(classify("I'm anxious about loud noises"), SupportCategory::Anxiety);
        assert_eq!(classify("busy and bright"), SupportCategory::Crowds);
        assert_eq!(classify("Grounding in public spaces"), SupportCategory::Grounding);
    }

    #[test]
    fn test_substring_matching() {
        // "lighting" contains "light", "crowds" contains "crowd"
        assert_eq!(classify("lighting accommodations"), SupportCategory::Lights);
        assert_eq!(classify("stay calm in crowds"), SupportCategory::Crowds);
    }

    #[test]
    fn test_fallback_unknown() {
        assert_eq!(classify("banana"), SupportCategory::Unknown);
        assert_eq!(classify(""), SupportCategory::Unknown);
    }

    #[test]
    fn test_table_covers_every_known_category() {
        for category in SupportCategory::ALL {
            let listed = KEYWORD_TABLE.iter().any(|(c, _)| *c == category);
            assert_eq!(listed, category != SupportCategory::Unknown);
        }
    }
}
