//! Prose summaries of a score breakdown.
//!
//! The descriptor bands below are for presentation only. They are not the
//! `excellent_score`/`good_score` thresholds used to classify
//! [`MatchQuality`](crate::models::MatchQuality), and the two can disagree for
//! the same score.

use crate::models::{Factor, Opening, Organization, Referral, ScoreBreakdown, ScoringWeights, Site};

pub const EXPLANATION_BAND_EXCELLENT: f64 = 90.0;
pub const EXPLANATION_BAND_STRONG: f64 = 75.0;
pub const EXPLANATION_BAND_GOOD: f64 = 60.0;
/// Totals below this get a sentence about the weakest factor
pub const EXPLANATION_CAUTION_BELOW: f64 = 85.0;

const TOP_FACTOR_COUNT: usize = 3;

/// Explain a score using the default weights as each factor's maximum
pub fn explain(
    breakdown: &ScoreBreakdown,
    total_score: f64,
    opening: &Opening,
    referral: &Referral,
    organization: Option<&Organization>,
    site: Option<&Site>,
) -> String {
    explain_with_weights(
        breakdown,
        total_score,
        opening,
        referral,
        organization,
        site,
        &ScoringWeights::DEFAULT,
    )
}

pub fn explain_with_weights(
    breakdown: &ScoreBreakdown,
    total_score: f64,
    opening: &Opening,
    referral: &Referral,
    organization: Option<&Organization>,
    site: Option<&Site>,
    weights: &ScoringWeights,
) -> String {
    let mut sentences = vec![descriptor(total_score, organization, site)];

    let mut scored: Vec<(Factor, f64)> = breakdown.iter().filter(|(_, score)| *score > 0.0).collect();
    // stable: equal scores keep factor declaration order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if scored.is_empty() {
        sentences.push("No individual factor scored above zero.".to_string());
    } else {
        let strengths: Vec<String> = scored
            .iter()
            .take(TOP_FACTOR_COUNT)
            .map(|(factor, score)| {
                format!("{} ({:.0}%)", factor.label(), percent_of_max(*score, factor.weight(weights)))
            })
            .collect();
        sentences.push(format!("Top strengths: {}.", strengths.join(", ")));
    }

    sentences.extend(highlights(opening, referral));

    if total_score < EXPLANATION_CAUTION_BELOW {
        if let Some((factor, ratio)) = weakest_factor(&scored, weights) {
            sentences.push(format!(
                "Consider: {} is the weakest area at {:.0}% of its maximum.",
                factor.label(),
                ratio * 100.0
            ));
        }
    }

    sentences.join(" ")
}

fn descriptor(total_score: f64, organization: Option<&Organization>, site: Option<&Site>) -> String {
    let quality = if total_score >= EXPLANATION_BAND_EXCELLENT {
        "Excellent match"
    } else if total_score >= EXPLANATION_BAND_STRONG {
        "Strong match"
    } else if total_score >= EXPLANATION_BAND_GOOD {
        "Good match"
    } else {
        "Possible match"
    };

    let provider = organization
        .map(|org| org.legal_name.trim())
        .filter(|name| !name.is_empty());
    let city = site
        .and_then(|site| site.city.as_deref())
        .map(str::trim)
        .filter(|city| !city.is_empty());

    match (provider, city) {
        (Some(provider), Some(city)) => format!("{} with {} in {}.", quality, provider, city),
        (Some(provider), None) => format!("{} with {}.", quality, provider),
        (None, Some(city)) => format!("{} in {}.", quality, city),
        (None, None) => format!("{}.", quality),
    }
}

fn highlights(opening: &Opening, referral: &Referral) -> Vec<String> {
    let mut notes = Vec::new();

    if let Some(metrics) = &opening.placement_success_metrics {
        let similar = metrics.similar_profile_placements;
        if similar > 0 {
            notes.push(format!(
                "Has placed {} client{} with a similar profile.",
                similar,
                if similar == 1 { "" } else { "s" }
            ));
        }
    }

    let prefs = &referral.client_preferences;
    if prefs.pets == Some(true) && opening.amenities.pets_allowed == Some(true) {
        notes.push("Pet-friendly, as the client prefers.".to_string());
    }
    if prefs.private_room == Some(true) && opening.amenities.private_rooms == Some(true) {
        notes.push("Private room available.".to_string());
    }

    let therapy = &opening.services_offered.on_site_therapy;
    if !therapy.is_empty() {
        notes.push(format!("On-site therapy: {}.", therapy.join(", ")));
    }

    notes
}

/// Lowest score relative to its own weight among factors that scored
fn weakest_factor(scored: &[(Factor, f64)], weights: &ScoringWeights) -> Option<(Factor, f64)> {
    scored
        .iter()
        .filter_map(|(factor, score)| {
            let weight = factor.weight(weights);
            (weight > 0.0).then(|| (*factor, score / weight))
        })
        .fold(None, |weakest, candidate| match weakest {
            Some((_, ratio)) if ratio <= candidate.1 => weakest,
            _ => Some(candidate),
        })
}

#[inline]
fn percent_of_max(score: f64, weight: f64) -> f64 {
    if weight > 0.0 {
        score / weight * 100.0
    } else {
        0.0
    }
}
