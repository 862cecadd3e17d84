//! Clinical signals read from referral free text.
//!
//! Matching is plain case-insensitive substring search, with no negation
//! handling: "no history of aggression" still reports aggression. Scoring and
//! risk flagging only see [`ClinicalSignals`], so the keyword reader can be
//! replaced without touching either.

use crate::models::Referral;

/// Facts inferred from a referral's behavioral and medical summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClinicalSignals {
    /// "aggression" or "severe" in the behavioral summary
    pub aggression: bool,
    /// "severe" in the behavioral summary
    pub severe_behavior: bool,
    pub physical_aggression: bool,
    pub self_harm: bool,
    pub elopement: bool,
    pub tube_feeding: bool,
    pub ventilator: bool,
    pub tracheostomy: bool,
    pub seizures: bool,
}

impl ClinicalSignals {
    pub fn complex_medical(&self) -> bool {
        self.ventilator || self.tracheostomy
    }
}

pub trait ClinicalTextSignals: Send + Sync {
    fn scan(&self, referral: &Referral) -> ClinicalSignals;
}

const AGGRESSION_KEYWORDS: &[&str] = &["aggression", "severe"];
const SEVERE_KEYWORDS: &[&str] = &["severe"];
const PHYSICAL_AGGRESSION_KEYWORDS: &[&str] = &["physical aggression", "physically aggressive", "violence", "violent", "assault"];
const SELF_HARM_KEYWORDS: &[&str] = &["self-harm", "self harm", "self-injur", "self injur"];
const ELOPEMENT_KEYWORDS: &[&str] = &["elopement", "elope", "wander", "flight risk"];
const TUBE_FEEDING_KEYWORDS: &[&str] = &["tube feeding", "tube-feeding", "g-tube", "feeding tube"];
const VENTILATOR_KEYWORDS: &[&str] = &["ventilator"];
const TRACH_KEYWORDS: &[&str] = &["trach"];
const SEIZURE_KEYWORDS: &[&str] = &["seizure"];

/// Default keyword reader
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSignals;

impl ClinicalTextSignals for KeywordSignals {
    fn scan(&self, referral: &Referral) -> ClinicalSignals {
        let behavioral = referral.behavioral_text().to_lowercase();
        let medical = referral.medical_text().to_lowercase();

        ClinicalSignals {
            aggression: contains_any(&behavioral, AGGRESSION_KEYWORDS),
            severe_behavior: contains_any(&behavioral, SEVERE_KEYWORDS),
            physical_aggression: contains_any(&behavioral, PHYSICAL_AGGRESSION_KEYWORDS),
            self_harm: contains_any(&behavioral, SELF_HARM_KEYWORDS),
            elopement: contains_any(&behavioral, ELOPEMENT_KEYWORDS),
            tube_feeding: contains_any(&medical, TUBE_FEEDING_KEYWORDS),
            ventilator: contains_any(&medical, VENTILATOR_KEYWORDS),
            tracheostomy: contains_any(&medical, TRACH_KEYWORDS),
            seizures: contains_any(&medical, SEIZURE_KEYWORDS),
        }
    }
}

#[inline]
fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn referral(behavioral: &str, medical: &str) -> Referral {
        Referral {
            behavioral_summary: Some(behavioral.to_string()),
            medical_summary: Some(medical.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_text_has_no_signals() {
        let signals = KeywordSignals.scan(&Referral::default());
        assert_eq!(signals, ClinicalSignals::default());
    }

    #[test]
    fn test_behavioral_keywords() {
        let signals = KeywordSignals.scan(&referral(
            "History of Physical Aggression toward staff; tends to wander at night.",
            "",
        ));

        assert!(signals.aggression);
        assert!(signals.physical_aggression);
        assert!(signals.elopement);
        assert!(!signals.severe_behavior);
        assert!(!signals.self_harm);
    }

    #[test]
    fn test_medical_keywords() {
        let signals = KeywordSignals.scan(&referral("", "Trach care, G-tube feeding, seizure protocol"));

        assert!(signals.tracheostomy);
        assert!(signals.tube_feeding);
        assert!(signals.seizures);
        assert!(!signals.ventilator);
        assert!(signals.complex_medical());
    }

    #[test]
    fn test_negation_is_not_understood() {
        let signals = KeywordSignals.scan(&referral("No history of aggression.", ""));
        assert!(signals.aggression);
    }

    #[test]
    fn test_medical_keywords_ignore_behavioral_text() {
        let signals = KeywordSignals.scan(&referral("Afraid of the ventilator noise", ""));
        assert!(!signals.ventilator);
    }
}
