//! Placement Match - referral-to-opening matching engine
//!
//! Given a client referral and a pool of provider openings, the engine drops
//! ineligible and disqualified openings, scores the rest on ten weighted
//! factors, ranks them, and explains each match. It performs no I/O; callers
//! load the collections and pass them in.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{explain, risk_flags, run_match, LookupTables, MatchRun, Matcher};
pub use models::{
    CapabilityProfile, LicenseInstance, MatchResult, MatchRunMeta, MatchingConfig,
    MatchingConfigOverrides, Opening, Organization, Referral, ScoreBreakdown, Site,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let run = run_match(&Referral::default(), &[], &[], &[], &[], &[], None);
        assert!(run.results.is_empty());
        assert_eq!(run.meta.openings_searched, 0);
        assert!(risk_flags(&Referral::default(), None).is_empty());
    }
}
