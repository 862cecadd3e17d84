use serde::{Deserialize, Serialize};

use crate::models::config::{MatchingConfig, ScoringWeights};
use crate::models::domain::{Opening, Organization, Site};

/// The ten scored dimensions of a referral/opening match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    CountyMatch,
    FundingMatch,
    GenderMatch,
    AgeMatch,
    AvailabilityMatch,
    CapabilityMatch,
    LocationProximity,
    PlacementSuccess,
    PreferencesMatch,
    ServicesMatch,
}

impl Factor {
    /// Declaration order; ties in explanations resolve in this order
    pub const ALL: [Factor; 10] = [
        Factor::CountyMatch,
        Factor::FundingMatch,
        Factor::GenderMatch,
        Factor::AgeMatch,
        Factor::AvailabilityMatch,
        Factor::CapabilityMatch,
        Factor::LocationProximity,
        Factor::PlacementSuccess,
        Factor::PreferencesMatch,
        Factor::ServicesMatch,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Factor::CountyMatch => "county_match",
            Factor::FundingMatch => "funding_match",
            Factor::GenderMatch => "gender_match",
            Factor::AgeMatch => "age_match",
            Factor::AvailabilityMatch => "availability_match",
            Factor::CapabilityMatch => "capability_match",
            Factor::LocationProximity => "location_proximity",
            Factor::PlacementSuccess => "placement_success",
            Factor::PreferencesMatch => "preferences_match",
            Factor::ServicesMatch => "services_match",
        }
    }

    /// Human-readable name used in explanations
    pub fn label(self) -> &'static str {
        match self {
            Factor::CountyMatch => "county match",
            Factor::FundingMatch => "funding compatibility",
            Factor::GenderMatch => "gender fit",
            Factor::AgeMatch => "age range fit",
            Factor::AvailabilityMatch => "availability timing",
            Factor::CapabilityMatch => "care capability",
            Factor::LocationProximity => "location proximity",
            Factor::PlacementSuccess => "placement track record",
            Factor::PreferencesMatch => "lifestyle preferences",
            Factor::ServicesMatch => "support services",
        }
    }

    pub fn weight(self, weights: &ScoringWeights) -> f64 {
        match self {
            Factor::CountyMatch => weights.county_match,
            Factor::FundingMatch => weights.funding_match,
            Factor::GenderMatch => weights.gender_match,
            Factor::AgeMatch => weights.age_match,
            Factor::AvailabilityMatch => weights.availability_match,
            Factor::CapabilityMatch => weights.capability_match,
            Factor::LocationProximity => weights.location_proximity,
            Factor::PlacementSuccess => weights.placement_success,
            Factor::PreferencesMatch => weights.preferences_match,
            Factor::ServicesMatch => weights.services_match,
        }
    }
}

/// Per-factor contributions for one opening.
///
/// Serializes as a flat map holding exactly the ten factor keys.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(default)]
    pub county_match: f64,
    #[serde(default)]
    pub funding_match: f64,
    #[serde(default)]
    pub gender_match: f64,
    #[serde(default)]
    pub age_match: f64,
    #[serde(default)]
    pub availability_match: f64,
    #[serde(default)]
    pub capability_match: f64,
    #[serde(default)]
    pub location_proximity: f64,
    #[serde(default)]
    pub placement_success: f64,
    #[serde(default)]
    pub preferences_match: f64,
    #[serde(default)]
    pub services_match: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::CountyMatch => self.county_match,
            Factor::FundingMatch => self.funding_match,
            Factor::GenderMatch => self.gender_match,
            Factor::AgeMatch => self.age_match,
            Factor::AvailabilityMatch => self.availability_match,
            Factor::CapabilityMatch => self.capability_match,
            Factor::LocationProximity => self.location_proximity,
            Factor::PlacementSuccess => self.placement_success,
            Factor::PreferencesMatch => self.preferences_match,
            Factor::ServicesMatch => self.services_match,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        Factor::ALL.into_iter().map(move |factor| (factor, self.get(factor)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, score)| score).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    Excellent,
    Good,
    Fair,
}

impl MatchQuality {
    pub fn classify(score: f64, excellent_score: f64, good_score: f64) -> Self {
        if score >= excellent_score {
            MatchQuality::Excellent
        } else if score >= good_score {
            MatchQuality::Good
        } else {
            MatchQuality::Fair
        }
    }
}

/// One ranked opening for a referral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub opening: Opening,
    pub organization: Option<Organization>,
    pub site: Option<Site>,
    /// Rounded sum of `score_breakdown`
    pub score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub match_explanation: String,
    pub quality: MatchQuality,
}

/// Why an opening was excluded before scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    Funding,
    Gender,
    Age,
    License,
    County,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub message: String,
}

/// Summary of one match run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRunMeta {
    pub openings_searched: usize,
    pub matches_found: usize,
    pub top_match_score: f64,
    pub avg_match_score: f64,
    pub latency_ms: f64,
    pub config_used: MatchingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_serializes_all_ten_keys() {
        let value = serde_json::to_value(ScoreBreakdown::default()).unwrap();
        let map = value.as_object().unwrap();

        assert_eq!(map.len(), 10);
        for factor in Factor::ALL {
            assert!(map.contains_key(factor.key()), "missing {}", factor.key());
        }
    }

    #[test]
    fn test_breakdown_total() {
        let breakdown = ScoreBreakdown {
            county_match: 18.0,
            funding_match: 12.6,
            placement_success: 4.2,
            ..Default::default()
        };

        assert!((breakdown.total() - 34.8).abs() < 1e-9);
    }

    #[test]
    fn test_quality_bands() {
        assert_eq!(MatchQuality::classify(85.0, 85.0, 70.0), MatchQuality::Excellent);
        assert_eq!(MatchQuality::classify(84.0, 85.0, 70.0), MatchQuality::Good);
        assert_eq!(MatchQuality::classify(70.0, 85.0, 70.0), MatchQuality::Good);
        assert_eq!(MatchQuality::classify(69.0, 85.0, 70.0), MatchQuality::Fair);
    }

    #[test]
    fn test_factor_weights_follow_config() {
        let weights = ScoringWeights::DEFAULT;
        let total: f64 = Factor::ALL.iter().map(|f| f.weight(&weights)).sum();
        assert_eq!(total, 100.0);
        assert_eq!(Factor::PlacementSuccess.weight(&weights), 6.0);
    }
}
