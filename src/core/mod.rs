// Core algorithm exports
pub mod explanation;
pub mod filters;
pub mod lookup;
pub mod matcher;
pub mod proximity;
pub mod risk;
pub mod scoring;
pub mod signals;

pub use explanation::{explain, explain_with_weights};
pub use filters::{check_constraints, is_eligible};
pub use lookup::{LookupTables, OpeningContext};
pub use matcher::{run_match, MatchOutcome, MatchRun, MatchSummary, Matcher};
pub use risk::{risk_flags, risk_flags_with};
pub use scoring::{score_opening, ScoringInput};
pub use signals::{ClinicalSignals, ClinicalTextSignals, KeywordSignals};
