use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::config::{MatchingConfigOverrides, WeightOverrides};
use crate::models::domain::{
    CapabilityProfile, LicenseInstance, Opening, Organization, Referral, Site,
};
use crate::models::results::{MatchResult, ScoreBreakdown};

/// Request to match a referral against a pool of openings
///
/// The caller supplies every collection the engine reads; nothing is loaded
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    pub referral: Referral,
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub openings: Vec<Opening>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub licenses: Vec<LicenseInstance>,
    #[serde(default, alias = "capabilities")]
    pub capability_profiles: Vec<CapabilityProfile>,
    #[serde(default)]
    pub config: Option<MatchingConfigOverrides>,
}

/// Request to re-explain a stored score
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExplainRequest {
    pub score_breakdown: ScoreBreakdown,
    #[validate(range(min = 0.0))]
    pub total_score: f64,
    #[serde(default)]
    pub opening: Opening,
    #[serde(default)]
    pub referral: Referral,
    #[serde(default)]
    pub organization: Option<Organization>,
    #[serde(default)]
    pub site: Option<Site>,
    /// Weights the score was computed with, if not the defaults
    #[serde(default)]
    pub weights: Option<WeightOverrides>,
}

/// Request for advisory risk flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFlagsRequest {
    pub referral: Referral,
    #[serde(default)]
    pub match_result: Option<MatchResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_find_request() {
        let request: FindMatchesRequest =
            serde_json::from_str(r#"{"referral": {"county": "Hennepin"}}"#).unwrap();

        assert!(request.openings.is_empty());
        assert!(request.config.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_negative_total_rejected() {
        let request: ExplainRequest =
            serde_json::from_str(r#"{"score_breakdown": {}, "total_score": -1}"#).unwrap();

        assert!(request.validate().is_err());
    }
}
