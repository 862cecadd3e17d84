// Model exports
pub mod config;
pub mod domain;
pub mod requests;
pub mod responses;
pub mod results;

pub use config::{
    ConfigWarning, ConstraintOverrides, MatchConstraints, MatchThresholds, MatchingConfig,
    MatchingConfigOverrides, ScoringWeights, ThresholdOverrides, WeightOverrides,
};
pub use domain::{
    Amenities, BehavioralCapabilities, CapabilityProfile, ClientPreferences, LicenseInstance,
    MedicalCapabilities, Opening, OpeningStatus, Organization, PlacementSuccessMetrics, Referral,
    ServicesOffered, SeverityLevel, Site, SpecificNeeds, UrgencyLevel,
};
pub use requests::{ExplainRequest, FindMatchesRequest, RiskFlagsRequest};
pub use responses::{
    ErrorResponse, ExplainResponse, FindMatchesResponse, HealthResponse, RiskFlagsResponse,
};
pub use results::{
    ConstraintViolation, Factor, MatchQuality, MatchResult, MatchRunMeta, ScoreBreakdown,
    ViolationKind,
};
