use chrono::NaiveDate;

use crate::core::lookup::OpeningContext;
use crate::core::proximity::{
    county_distance_miles, proximity_ratio, same_county, DEFAULT_PREFERRED_DISTANCE_MILES,
};
use crate::core::signals::ClinicalSignals;
use crate::models::{Opening, Referral, ScoreBreakdown, ScoringWeights, SeverityLevel};

/// Everything a factor scorer may look at for one referral/opening pair
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub referral: &'a Referral,
    pub opening: &'a Opening,
    pub context: OpeningContext<'a>,
    pub signals: &'a ClinicalSignals,
    /// Day the match is computed for
    pub as_of: NaiveDate,
}

/// Score one opening on all ten factors
///
/// Scoring formula (default weights):
/// score = (
///     county            * 18 +   # site county, then counties served
///     funding           * 18 +   # exact, then Medical Assistance family
///     gender            * 12 +
///     age               * 12 +   # 2 year grace beyond bounds
///     availability      * 10 +   # -10% per day late, floor 30%
///     capability        * 10 +   # penalties for unsupported clinical needs
///     location_proximity * 8 +
///     placement_success  * 6 +   # success rate + similar placements
///     preferences        * 4 +
///     services           * 2
/// )
pub fn score_opening(input: &ScoringInput<'_>, weights: &ScoringWeights) -> ScoreBreakdown {
    ScoreBreakdown {
        county_match: score_county(input, weights.county_match),
        funding_match: score_funding(input, weights.funding_match),
        gender_match: score_gender(input, weights.gender_match),
        age_match: score_age(input, weights.age_match),
        availability_match: score_availability(input, weights.availability_match),
        capability_match: score_capability(input, weights.capability_match),
        location_proximity: score_location_proximity(input, weights.location_proximity),
        placement_success: score_placement_success(input, weights.placement_success),
        preferences_match: score_preferences(input, weights.preferences_match),
        services_match: score_services(input, weights.services_match),
    }
}

pub fn score_county(input: &ScoringInput<'_>, weight: f64) -> f64 {
    let Some(county) = input.referral.county.as_deref() else {
        return 0.0;
    };

    if input
        .context
        .site_county()
        .is_some_and(|site_county| same_county(site_county, county))
    {
        return weight;
    }

    if input
        .context
        .organization
        .is_some_and(|org| org.serves_county(county))
    {
        return weight * 0.9;
    }

    0.0
}

pub fn score_funding(input: &ScoringInput<'_>, weight: f64) -> f64 {
    let Some(funding) = input.referral.funding_source.as_deref() else {
        return 0.0;
    };

    if input.opening.accepts_funding(funding) {
        return weight;
    }

    // Medical Assistance programs are interchangeable enough for partial credit
    let medical_assistance = funding.contains("MA")
        && input
            .opening
            .funding_accepted
            .iter()
            .any(|accepted| accepted.contains("MA"));
    if medical_assistance {
        return weight * 0.7;
    }

    0.0
}

pub fn score_gender(input: &ScoringInput<'_>, weight: f64) -> f64 {
    let unspecified = |value: Option<&str>| value.map_or(true, |v| v.eq_ignore_ascii_case("any"));

    let gender = input.referral.gender.as_deref();
    let required = input.opening.gender_requirement.as_deref();
    if unspecified(gender) || unspecified(required) {
        return weight;
    }

    match (gender, required) {
        (Some(gender), Some(required)) if gender.eq_ignore_ascii_case(required) => weight,
        _ => 0.0,
    }
}

pub fn score_age(input: &ScoringInput<'_>, weight: f64) -> f64 {
    let (min, max) = (input.opening.age_min, input.opening.age_max);
    if min.is_none() && max.is_none() {
        return weight;
    }

    let Some(age) = input.referral.age else {
        return weight * 0.5;
    };

    let shortfall = match (min, max) {
        (Some(min), _) if age < min => min - age,
        (_, Some(max)) if age > max => age - max,
        _ => 0,
    };

    match shortfall {
        0 => weight,
        1..=2 => weight * 0.5,
        _ => 0.0,
    }
}

pub fn score_availability(input: &ScoringInput<'_>, weight: f64) -> f64 {
    if !input.opening.is_open() {
        return 0.0;
    }

    let (Some(desired), Some(available)) = (
        input.referral.desired_start_date,
        input.opening.available_date,
    ) else {
        return weight;
    };

    if available <= input.as_of {
        return weight;
    }

    let days_late = (available - desired).num_days();
    if days_late <= 0 {
        return weight;
    }

    weight * (1.0 - 0.1 * days_late as f64).max(0.3)
}

pub fn score_capability(input: &ScoringInput<'_>, weight: f64) -> f64 {
    let Some(profile) = input.context.capability else {
        return weight * 0.5;
    };

    let signals = input.signals;
    let mut score = weight;

    if signals.aggression {
        let required = if signals.severe_behavior {
            SeverityLevel::Severe
        } else {
            SeverityLevel::Moderate
        };
        if profile.behavioral.aggression_severity < required {
            score -= weight * 0.5;
        }
    }

    if signals.elopement && profile.behavioral.elopement_severity == SeverityLevel::None {
        score -= weight * 0.3;
    }

    if signals.tube_feeding && !profile.medical.tube_feeding {
        score -= weight * 0.4;
    }

    if signals.ventilator && !profile.medical.ventilator {
        score -= weight * 0.5;
    }

    if signals.seizures && !profile.medical.seizure_management {
        score -= weight * 0.3;
    }

    score.max(0.0)
}

pub fn score_location_proximity(input: &ScoringInput<'_>, weight: f64) -> f64 {
    let Some(distance) = county_distance_miles(
        input.referral.county.as_deref(),
        input.context.site_county(),
    ) else {
        return 0.0;
    };

    let preferred = input
        .referral
        .client_preferences
        .preferred_distance_miles
        .unwrap_or(DEFAULT_PREFERRED_DISTANCE_MILES);

    weight * proximity_ratio(distance, preferred)
}

pub fn score_placement_success(input: &ScoringInput<'_>, weight: f64) -> f64 {
    let Some(metrics) = input.opening.placement_success_metrics else {
        return 0.0;
    };

    let success_rate = if metrics.total_placements_last_year > 0 {
        (metrics.successful_placements_90_days as f64
            / metrics.total_placements_last_year as f64)
            .min(1.0)
    } else {
        0.0
    };
    let similar_bonus = (metrics.similar_profile_placements as f64 / 10.0).min(1.0);

    weight * 0.5 * success_rate + weight * 0.5 * similar_bonus
}

pub fn score_preferences(input: &ScoringInput<'_>, weight: f64) -> f64 {
    let prefs = &input.referral.client_preferences;
    let amenities = &input.opening.amenities;
    let mut stated = 0u32;
    let mut matched = 0u32;

    let mut tally = |is_match: bool| {
        stated += 1;
        if is_match {
            matched += 1;
        }
    };

    if prefs.pets == Some(true) {
        tally(amenities.pets_allowed == Some(true));
    }
    if let Some(community) = prefs.community_type.as_deref().filter(|c| !c.is_empty()) {
        tally(
            amenities
                .community_type
                .as_deref()
                .is_some_and(|offered| offered.eq_ignore_ascii_case(community)),
        );
    }
    if prefs.private_room == Some(true) {
        tally(amenities.private_rooms == Some(true));
    }
    if let Some(smoking) = prefs.smoking {
        tally(amenities.smoking_allowed.unwrap_or(false) == smoking);
    }
    if !prefs.dietary_restrictions.is_empty() {
        tally(
            prefs
                .dietary_restrictions
                .iter()
                .all(|diet| contains_ignore_case(&amenities.dietary_accommodations, diet)),
        );
    }
    if !prefs.languages.is_empty() {
        tally(
            prefs
                .languages
                .iter()
                .any(|language| contains_ignore_case(&amenities.languages, language)),
        );
    }

    if stated == 0 {
        return weight * 0.5;
    }
    weight * matched as f64 / stated as f64
}

pub fn score_services(input: &ScoringInput<'_>, weight: f64) -> f64 {
    let needs = &input.referral.specific_needs;
    let opening = input.opening;
    let mut needed = 0.0;
    let mut met = 0.0;

    let mut tally = |units: f64, is_met: bool| {
        needed += units;
        if is_met {
            met += units;
        }
    };

    if needs.transportation == Some(true) {
        tally(1.0, opening.amenities.transportation == Some(true));
    }
    if !needs.specialized_therapy.is_empty() {
        tally(
            0.8,
            needs
                .specialized_therapy
                .iter()
                .any(|therapy| contains_ignore_case(&opening.services_offered.on_site_therapy, therapy)),
        );
    }
    if needs.day_program == Some(true) {
        tally(1.0, opening.services_offered.day_program_partnership == Some(true));
    }
    if needs.wheelchair_access == Some(true) {
        tally(1.0, opening.amenities.wheelchair_accessible == Some(true));
    }

    if needed == 0.0 {
        return weight * 0.5;
    }
    weight * met / needed
}

#[inline]
fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|item| item.eq_ignore_ascii_case(needle))
}
