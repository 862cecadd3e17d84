use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;

use crate::core::{
    explanation::explain_with_weights,
    filters::{check_constraints, is_eligible},
    lookup::{LookupTables, OpeningContext},
    scoring::{score_opening, ScoringInput},
    signals::{ClinicalTextSignals, KeywordSignals},
};
use crate::models::{
    CapabilityProfile, LicenseInstance, MatchQuality, MatchResult, MatchRunMeta, MatchingConfig,
    MatchingConfigOverrides, Opening, Organization, Referral, ScoreBreakdown, Site,
};

/// Ranked results of one referral, before any timing is attached
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub results: Vec<MatchResult>,
    /// Every opening handed in, eligible or not
    pub openings_searched: usize,
    /// Openings that passed the active/spots pre-filter
    pub eligible: usize,
    /// Eligible openings dropped by a hard constraint
    pub excluded: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSummary {
    pub matches_found: usize,
    pub top_match_score: f64,
    pub avg_match_score: f64,
}

impl MatchOutcome {
    pub fn summary(&self) -> MatchSummary {
        let matches_found = self.results.len();
        let top_match_score = self.results.first().map_or(0.0, |r| r.score);
        let avg_match_score = if matches_found == 0 {
            0.0
        } else {
            (self.results.iter().map(|r| r.score).sum::<f64>() / matches_found as f64).round()
        };

        MatchSummary {
            matches_found,
            top_match_score,
            avg_match_score,
        }
    }
}

/// Results plus run metadata, as returned to callers
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRun {
    pub results: Vec<MatchResult>,
    pub meta: MatchRunMeta,
}

struct Candidate<'o, 'c> {
    opening: &'o Opening,
    context: OpeningContext<'c>,
    breakdown: ScoreBreakdown,
    total: f64,
}

/// Main matching orchestrator - implements the referral/opening pipeline
///
/// # Pipeline Stages
/// 1. Eligibility pre-filter (active, spots available)
/// 2. Hard constraints (funding, gender, age, license, county)
/// 3. Ten-factor scoring
/// 4. Minimum score cut, ranking, result cap
/// 5. Explanations for the survivors
#[derive(Clone)]
pub struct Matcher {
    config: MatchingConfig,
    signals: Arc<dyn ClinicalTextSignals>,
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Matcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self {
            config,
            signals: Arc::new(KeywordSignals),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(MatchingConfig::DEFAULT)
    }

    /// Resolve `overrides` over the system defaults
    pub fn from_overrides(overrides: &MatchingConfigOverrides) -> Self {
        Self::new(MatchingConfig::resolve(overrides))
    }

    /// Swap the clinical text reader
    pub fn with_signals(mut self, signals: Arc<dyn ClinicalTextSignals>) -> Self {
        self.signals = signals;
        self
    }

    /// Copy of this matcher with further overrides layered on its config
    pub fn with_overrides(&self, overrides: &MatchingConfigOverrides) -> Self {
        Self {
            config: self.config.merged(overrides),
            signals: Arc::clone(&self.signals),
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Find and rank openings for a referral
    ///
    /// Pure: the same inputs always give the same outcome. `as_of` is the
    /// day availability dates are compared against.
    ///
    /// # Arguments
    /// * `referral` - The client being placed
    /// * `openings` - Candidate openings, in a deterministic order
    /// * `tables` - Pre-indexed organizations, sites, licenses and capabilities
    /// * `as_of` - Today's date for availability scoring
    pub fn find_matches(
        &self,
        referral: &Referral,
        openings: &[Opening],
        tables: &LookupTables<'_>,
        as_of: NaiveDate,
    ) -> MatchOutcome {
        let MatchingConfig {
            weights,
            constraints,
            thresholds,
        } = &self.config;
        let signals = self.signals.scan(referral);

        let mut eligible = 0;
        let mut excluded = 0;
        let mut candidates = Vec::new();

        for opening in openings {
            // Stage 1: eligibility
            if !is_eligible(opening) {
                continue;
            }
            eligible += 1;

            // Stage 2: hard constraints
            let context = tables.context_for(opening);
            let violations = check_constraints(referral, opening, &context, constraints);
            if !violations.is_empty() {
                excluded += 1;
                tracing::debug!(
                    "Opening {} excluded: {:?}",
                    opening.id,
                    violations.iter().map(|v| v.kind).collect::<Vec<_>>()
                );
                continue;
            }

            // Stage 3: scoring
            let input = ScoringInput {
                referral,
                opening,
                context,
                signals: &signals,
                as_of,
            };
            let breakdown = score_opening(&input, weights);
            let total = breakdown.total();

            // the cut applies to the score callers see
            if total.round() < thresholds.minimum_score {
                tracing::trace!("Opening {} below minimum score ({:.1})", opening.id, total);
                continue;
            }

            candidates.push(Candidate {
                opening,
                context,
                breakdown,
                total,
            });
        }

        // Stage 4: rank (stable, so ties keep input order) and cap
        candidates.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(thresholds.max_results);

        // Stage 5: explain
        let results = candidates
            .into_iter()
            .map(|candidate| self.to_result(referral, candidate))
            .collect();

        MatchOutcome {
            results,
            openings_searched: openings.len(),
            eligible,
            excluded,
        }
    }

    /// Match several referrals against one set of lookup tables
    pub fn find_matches_batch(
        &self,
        referrals: &[Referral],
        openings: &[Opening],
        tables: &LookupTables<'_>,
        as_of: NaiveDate,
    ) -> Vec<MatchOutcome> {
        referrals
            .iter()
            .map(|referral| self.find_matches(referral, openings, tables, as_of))
            .collect()
    }

    /// Timed run against today's date, with run metadata attached
    pub fn run(&self, referral: &Referral, openings: &[Opening], tables: &LookupTables<'_>) -> MatchRun {
        let as_of = chrono::Local::now().date_naive();
        let started = Instant::now();
        let outcome = self.find_matches(referral, openings, tables, as_of);
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        let summary = outcome.summary();
        tracing::info!(
            "Matched referral {}: {} of {} openings (eligible {}, excluded {}), top {} avg {} in {:.2}ms",
            referral.id.as_deref().unwrap_or("<unsaved>"),
            summary.matches_found,
            outcome.openings_searched,
            outcome.eligible,
            outcome.excluded,
            summary.top_match_score,
            summary.avg_match_score,
            latency_ms
        );

        MatchRun {
            meta: MatchRunMeta {
                openings_searched: outcome.openings_searched,
                matches_found: summary.matches_found,
                top_match_score: summary.top_match_score,
                avg_match_score: summary.avg_match_score,
                latency_ms,
                config_used: self.config,
            },
            results: outcome.results,
        }
    }

    fn to_result(&self, referral: &Referral, candidate: Candidate<'_, '_>) -> MatchResult {
        let thresholds = &self.config.thresholds;
        let score = candidate.total.round();
        let organization = candidate.context.organization;
        let site = candidate.context.site;

        let match_explanation = explain_with_weights(
            &candidate.breakdown,
            score,
            candidate.opening,
            referral,
            organization,
            site,
            &self.config.weights,
        );

        MatchResult {
            opening: candidate.opening.clone(),
            organization: organization.cloned(),
            site: site.cloned(),
            score,
            score_breakdown: candidate.breakdown,
            match_explanation,
            quality: MatchQuality::classify(score, thresholds.excellent_score, thresholds.good_score),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// One-shot match over flat collections
///
/// Indexes the collections, resolves `overrides` over the defaults and runs a
/// timed match.
pub fn run_match(
    referral: &Referral,
    openings: &[Opening],
    organizations: &[Organization],
    sites: &[Site],
    licenses: &[LicenseInstance],
    capabilities: &[CapabilityProfile],
    overrides: Option<&MatchingConfigOverrides>,
) -> MatchRun {
    let matcher = overrides.map_or_else(Matcher::with_defaults, Matcher::from_overrides);
    let tables = LookupTables::new(organizations, sites, licenses, capabilities);
    matcher.run(referral, openings, &tables)
}
