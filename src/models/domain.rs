use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Client referral awaiting placement
///
/// Every field is optional on the wire: referrals arrive from intake forms
/// that are filled in progressively, and the engine scores whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Referral {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub funding_source: Option<String>,
    #[serde(default)]
    pub desired_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub behavioral_summary: Option<String>,
    #[serde(default)]
    pub medical_summary: Option<String>,
    #[serde(default)]
    pub client_preferences: ClientPreferences,
    #[serde(default)]
    pub specific_needs: SpecificNeeds,
    #[serde(default)]
    pub urgency_level: Option<UrgencyLevel>,
}

impl Referral {
    pub fn behavioral_text(&self) -> &str {
        self.behavioral_summary.as_deref().unwrap_or("")
    }

    pub fn medical_text(&self) -> &str {
        self.medical_summary.as_deref().unwrap_or("")
    }

    pub fn is_crisis(&self) -> bool {
        matches!(self.urgency_level, Some(UrgencyLevel::Crisis))
    }
}

/// Lifestyle preferences stated by the client or their case manager
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientPreferences {
    #[serde(default)]
    pub pets: Option<bool>,
    #[serde(default)]
    pub community_type: Option<String>,
    #[serde(default)]
    pub private_room: Option<bool>,
    #[serde(default)]
    pub smoking: Option<bool>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub preferred_distance_miles: Option<f64>,
}

/// Support needs that a placement must be able to serve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecificNeeds {
    #[serde(default)]
    pub transportation: Option<bool>,
    #[serde(default)]
    pub specialized_therapy: Vec<String>,
    #[serde(default)]
    pub day_program: Option<bool>,
    #[serde(default)]
    pub wheelchair_access: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Routine,
    Urgent,
    Crisis,
}

/// A provider's available placement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub status: OpeningStatus,
    #[serde(default)]
    pub spots_available: i32,
    #[serde(default)]
    pub funding_accepted: Vec<String>,
    #[serde(default)]
    pub gender_requirement: Option<String>,
    #[serde(default)]
    pub age_min: Option<u32>,
    #[serde(default)]
    pub age_max: Option<u32>,
    #[serde(default)]
    pub available_date: Option<NaiveDate>,
    #[serde(default)]
    pub amenities: Amenities,
    #[serde(default)]
    pub services_offered: ServicesOffered,
    #[serde(default)]
    pub placement_success_metrics: Option<PlacementSuccessMetrics>,
}

impl Opening {
    /// Active with at least one spot left
    pub fn is_open(&self) -> bool {
        self.status == OpeningStatus::Active && self.spots_available > 0
    }

    pub fn accepts_funding(&self, funding: &str) -> bool {
        self.funding_accepted
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(funding))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningStatus {
    Active,
    OnHold,
    Filled,
    Closed,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Amenities {
    #[serde(default)]
    pub pets_allowed: Option<bool>,
    #[serde(default)]
    pub community_type: Option<String>,
    #[serde(default)]
    pub private_rooms: Option<bool>,
    #[serde(default)]
    pub smoking_allowed: Option<bool>,
    #[serde(default)]
    pub dietary_accommodations: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub transportation: Option<bool>,
    #[serde(default)]
    pub wheelchair_accessible: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicesOffered {
    #[serde(default)]
    pub on_site_therapy: Vec<String>,
    #[serde(default)]
    pub day_program_partnership: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementSuccessMetrics {
    #[serde(default)]
    pub successful_placements_90_days: u32,
    #[serde(default)]
    pub total_placements_last_year: u32,
    #[serde(default)]
    pub similar_profile_placements: u32,
}

/// Provider organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub legal_name: String,
    #[serde(default)]
    pub counties_served: Vec<String>,
}

impl Organization {
    pub fn serves_county(&self, county: &str) -> bool {
        self.counties_served
            .iter()
            .any(|served| served.eq_ignore_ascii_case(county))
    }
}

/// Physical location belonging to one organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LicenseInstance {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub status: String,
}

impl LicenseInstance {
    pub fn is_verified(&self) -> bool {
        self.status == "verified"
    }
}

/// Behavioral and medical support a site (or whole organization) can provide
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityProfile {
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub behavioral: BehavioralCapabilities,
    #[serde(default)]
    pub medical: MedicalCapabilities,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehavioralCapabilities {
    #[serde(default)]
    pub aggression_severity: SeverityLevel,
    #[serde(default)]
    pub elopement_severity: SeverityLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalCapabilities {
    #[serde(default)]
    pub tube_feeding: bool,
    #[serde(default)]
    pub ventilator: bool,
    #[serde(default)]
    pub seizure_management: bool,
}

/// Highest severity a provider is staffed to manage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    #[default]
    None,
    Mild,
    Moderate,
    Severe,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_opening_deserializes() {
        let opening: Opening = serde_json::from_str(r#"{"id": "o1"}"#).unwrap();

        assert_eq!(opening.status, OpeningStatus::Other);
        assert_eq!(opening.spots_available, 0);
        assert!(opening.funding_accepted.is_empty());
        assert!(!opening.is_open());
    }

    #[test]
    fn test_records_without_ids_deserialize() {
        let opening: Opening = serde_json::from_str(r#"{"status": "active"}"#).unwrap();
        let organization: Organization =
            serde_json::from_str(r#"{"legal_name": "Lakeside"}"#).unwrap();
        let site: Site = serde_json::from_str(r#"{"county": "Ramsey"}"#).unwrap();
        let license: LicenseInstance = serde_json::from_str(r#"{"status": "verified"}"#).unwrap();

        assert!(opening.id.is_empty());
        assert!(organization.id.is_empty());
        assert_eq!(site.county.as_deref(), Some("Ramsey"));
        assert!(license.organization_id.is_empty());
        assert!(license.is_verified());
    }

    #[test]
    fn test_unknown_status_is_preserved_as_other() {
        let opening: Opening =
            serde_json::from_str(r#"{"id": "o1", "status": "archived", "spots_available": 3}"#)
                .unwrap();

        assert_eq!(opening.status, OpeningStatus::Other);
        assert!(!opening.is_open());
    }

    #[test]
    fn test_funding_is_case_insensitive() {
        let opening = Opening {
            id: "o1".to_string(),
            funding_accepted: vec!["CADI".to_string()],
            ..Default::default()
        };

        assert!(opening.accepts_funding("cadi"));
        assert!(!opening.accepts_funding("DD"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(SeverityLevel::Severe > SeverityLevel::Moderate);
        assert!(SeverityLevel::Mild < SeverityLevel::Moderate);
        assert_eq!(SeverityLevel::default(), SeverityLevel::None);
    }

    #[test]
    fn test_referral_dates_parse() {
        let referral: Referral = serde_json::from_str(
            r#"{"county": "Hennepin", "desired_start_date": "2024-03-01", "urgency_level": "crisis"}"#,
        )
        .unwrap();

        assert_eq!(
            referral.desired_start_date,
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert!(referral.is_crisis());
    }
}
