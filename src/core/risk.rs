use crate::core::signals::{ClinicalTextSignals, KeywordSignals};
use crate::models::{MatchResult, Referral};

/// Match scores below this are flagged for manual review
pub const LOW_CONFIDENCE_SCORE: f64 = 60.0;

pub const FLAG_PHYSICAL_AGGRESSION: &str = "Physical aggression noted";
pub const FLAG_SELF_INJURY: &str = "Self-injurious behavior";
pub const FLAG_ELOPEMENT: &str = "Elopement risk";
pub const FLAG_COMPLEX_MEDICAL: &str = "Complex medical needs";
pub const FLAG_CRISIS: &str = "Crisis placement";
pub const FLAG_LOW_CONFIDENCE: &str = "Low match confidence";

/// Advisory flags for a referral, optionally in light of one match
pub fn risk_flags(referral: &Referral, result: Option<&MatchResult>) -> Vec<String> {
    risk_flags_with(&KeywordSignals, referral, result)
}

/// Same as [`risk_flags`] with a caller-chosen text reader.
///
/// Flags always come out in the same order.
pub fn risk_flags_with(
    reader: &dyn ClinicalTextSignals,
    referral: &Referral,
    result: Option<&MatchResult>,
) -> Vec<String> {
    let signals = reader.scan(referral);

    let checks = [
        (signals.physical_aggression, FLAG_PHYSICAL_AGGRESSION),
        (signals.self_harm, FLAG_SELF_INJURY),
        (signals.elopement, FLAG_ELOPEMENT),
        (signals.complex_medical(), FLAG_COMPLEX_MEDICAL),
        (referral.is_crisis(), FLAG_CRISIS),
        (
            result.is_some_and(|r| r.score < LOW_CONFIDENCE_SCORE),
            FLAG_LOW_CONFIDENCE,
        ),
    ];

    checks
        .into_iter()
        .filter(|(raised, _)| *raised)
        .map(|(_, flag)| flag.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchQuality, Opening, ScoreBreakdown, UrgencyLevel};

    fn result_with_score(score: f64) -> MatchResult {
        MatchResult {
            opening: Opening::default(),
            organization: None,
            site: None,
            score,
            score_breakdown: ScoreBreakdown::default(),
            match_explanation: String::new(),
            quality: MatchQuality::Fair,
        }
    }

    #[test]
    fn test_no_flags_for_plain_referral() {
        assert!(risk_flags(&Referral::default(), None).is_empty());
    }

    #[test]
    fn test_flags_in_fixed_order() {
        let referral = Referral {
            behavioral_summary: Some(
                "Elopement attempts weekly. Self-injurious when anxious. Violent outbursts.".to_string(),
            ),
            medical_summary: Some("Ventilator dependent overnight".to_string()),
            urgency_level: Some(UrgencyLevel::Crisis),
            ..Default::default()
        };

        let flags = risk_flags(&referral, Some(&result_with_score(45.0)));

        assert_eq!(
            flags,
            vec![
                FLAG_PHYSICAL_AGGRESSION,
                FLAG_SELF_INJURY,
                FLAG_ELOPEMENT,
                FLAG_COMPLEX_MEDICAL,
                FLAG_CRISIS,
                FLAG_LOW_CONFIDENCE,
            ]
        );
    }

    #[test]
    fn test_low_confidence_boundary() {
        let referral = Referral::default();

        assert!(risk_flags(&referral, Some(&result_with_score(60.0))).is_empty());
        assert_eq!(
            risk_flags(&referral, Some(&result_with_score(59.0))),
            vec![FLAG_LOW_CONFIDENCE]
        );
    }

    #[test]
    fn test_urgent_is_not_crisis() {
        let referral = Referral {
            urgency_level: Some(UrgencyLevel::Urgent),
            ..Default::default()
        };
        assert!(risk_flags(&referral, None).is_empty());
    }

    #[test]
    fn test_trach_counts_as_complex_medical() {
        let referral = Referral {
            medical_summary: Some("TRACH suctioning every 4 hours".to_string()),
            ..Default::default()
        };
        assert_eq!(risk_flags(&referral, None), vec![FLAG_COMPLEX_MEDICAL]);
    }
}
