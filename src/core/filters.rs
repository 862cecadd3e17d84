use crate::core::lookup::OpeningContext;
use crate::core::proximity::{county_distance_miles, same_county};
use crate::models::{ConstraintViolation, MatchConstraints, Opening, Referral, ViolationKind};

/// Check whether an opening can take a placement at all
///
/// This is the pre-filter: ineligible openings are never checked against
/// constraints or scored.
#[inline]
pub fn is_eligible(opening: &Opening) -> bool {
    opening.is_open()
}

/// Evaluate every enabled hard constraint
///
/// Returns all violations; an opening with any violation is excluded.
pub fn check_constraints(
    referral: &Referral,
    opening: &Opening,
    context: &OpeningContext<'_>,
    constraints: &MatchConstraints,
) -> Vec<ConstraintViolation> {
    let mut violations = Vec::new();

    if constraints.require_funding_match {
        let funding = referral.funding_source.as_deref().unwrap_or("");
        if !opening.accepts_funding(funding) {
            violations.push(ConstraintViolation {
                kind: ViolationKind::Funding,
                message: format!("Funding source '{}' not accepted", funding),
            });
        }
    }

    if constraints.require_gender_match {
        if let (Some(required), Some(gender)) = (
            opening.gender_requirement.as_deref(),
            referral.gender.as_deref(),
        ) {
            if required != "any" && required != gender {
                violations.push(ConstraintViolation {
                    kind: ViolationKind::Gender,
                    message: format!("Opening requires {}, client is {}", required, gender),
                });
            }
        }
    }

    if constraints.require_age_range_match {
        if let Some(age) = referral.age {
            let too_young = opening.age_min.is_some_and(|min| age < min);
            let too_old = opening.age_max.is_some_and(|max| age > max);
            if too_young || too_old {
                violations.push(ConstraintViolation {
                    kind: ViolationKind::Age,
                    message: format!(
                        "Client age {} outside range {}-{}",
                        age,
                        bound_label(opening.age_min),
                        bound_label(opening.age_max)
                    ),
                });
            }
        }
    }

    if constraints.require_verified_license {
        if let Some(license) = context.license {
            if !license.is_verified() {
                violations.push(ConstraintViolation {
                    kind: ViolationKind::License,
                    message: format!("License status is '{}', not verified", license.status),
                });
            }
        }
    }

    if constraints.require_county_proximity {
        if let Some(violation) = check_county_proximity(referral, context, constraints) {
            violations.push(violation);
        }
    }

    violations
}

fn check_county_proximity(
    referral: &Referral,
    context: &OpeningContext<'_>,
    constraints: &MatchConstraints,
) -> Option<ConstraintViolation> {
    let referral_county = referral.county.as_deref();
    let site_county = context.site_county();

    if let (Some(a), Some(b)) = (referral_county, site_county) {
        if same_county(a, b) {
            return None;
        }
    }

    let limit = constraints
        .max_county_distance
        .min(constraints.max_distance_miles);

    match county_distance_miles(referral_county, site_county) {
        Some(distance) if distance <= limit => None,
        Some(distance) => Some(ConstraintViolation {
            kind: ViolationKind::County,
            message: format!("Site is about {} miles away, limit is {}", distance, limit),
        }),
        None => Some(ConstraintViolation {
            kind: ViolationKind::County,
            message: "County unknown for client or site".to_string(),
        }),
    }
}

fn bound_label(bound: Option<u32>) -> String {
    bound.map_or_else(|| "any".to_string(), |value| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LicenseInstance, OpeningStatus, Site};

    fn create_referral() -> Referral {
        Referral {
            county: Some("Hennepin".to_string()),
            gender: Some("male".to_string()),
            age: Some(35),
            funding_source: Some("CADI".to_string()),
            ..Default::default()
        }
    }

    fn create_opening() -> Opening {
        Opening {
            id: "o1".to_string(),
            organization_id: "org1".to_string(),
            site_id: Some("site1".to_string()),
            status: OpeningStatus::Active,
            spots_available: 2,
            funding_accepted: vec!["CADI".to_string()],
            gender_requirement: Some("any".to_string()),
            age_min: Some(18),
            age_max: Some(65),
            ..Default::default()
        }
    }

    fn kinds(violations: &[ConstraintViolation]) -> Vec<ViolationKind> {
        violations.iter().map(|v| v.kind).collect()
    }

    #[test]
    fn test_eligibility() {
        let mut opening = create_opening();
        assert!(is_eligible(&opening));

        opening.spots_available = 0;
        assert!(!is_eligible(&opening));

        opening.spots_available = 1;
        opening.status = OpeningStatus::Filled;
        assert!(!is_eligible(&opening));
    }

    #[test]
    fn test_passing_opening_has_no_violations() {
        let violations = check_constraints(
            &create_referral(),
            &create_opening(),
            &OpeningContext::default(),
            &MatchConstraints::DEFAULT,
        );

        assert!(violations.is_empty());
    }

    #[test]
    fn test_funding_violation() {
        let mut opening = create_opening();
        opening.funding_accepted = vec!["Private_Pay".to_string()];

        let violations = check_constraints(
            &create_referral(),
            &opening,
            &OpeningContext::default(),
            &MatchConstraints::DEFAULT,
        );
        assert_eq!(kinds(&violations), vec![ViolationKind::Funding]);

        let relaxed = MatchConstraints {
            require_funding_match: false,
            ..MatchConstraints::DEFAULT
        };
        assert!(check_constraints(&create_referral(), &opening, &OpeningContext::default(), &relaxed).is_empty());
    }

    #[test]
    fn test_missing_funding_source_violates() {
        let mut referral = create_referral();
        referral.funding_source = None;

        let violations = check_constraints(
            &referral,
            &create_opening(),
            &OpeningContext::default(),
            &MatchConstraints::DEFAULT,
        );
        assert_eq!(kinds(&violations), vec![ViolationKind::Funding]);
    }

    #[test]
    fn test_gender_match_is_case_sensitive() {
        let mut opening = create_opening();
        opening.gender_requirement = Some("Male".to_string());

        let violations = check_constraints(
            &create_referral(),
            &opening,
            &OpeningContext::default(),
            &MatchConstraints::DEFAULT,
        );
        assert_eq!(kinds(&violations), vec![ViolationKind::Gender]);
    }

    #[test]
    fn test_gender_skipped_when_unknown() {
        let mut referral = create_referral();
        referral.gender = None;
        let mut opening = create_opening();
        opening.gender_requirement = Some("female".to_string());

        let violations = check_constraints(
            &referral,
            &opening,
            &OpeningContext::default(),
            &MatchConstraints::DEFAULT,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_age_violation() {
        let mut referral = create_referral();
        referral.age = Some(10);

        let violations = check_constraints(
            &referral,
            &create_opening(),
            &OpeningContext::default(),
            &MatchConstraints::DEFAULT,
        );
        assert_eq!(kinds(&violations), vec![ViolationKind::Age]);
        assert_eq!(violations[0].message, "Client age 10 outside range 18-65");
    }

    #[test]
    fn test_unverified_license_violation() {
        let license = LicenseInstance {
            id: None,
            organization_id: "org1".to_string(),
            status: "expired".to_string(),
        };
        let context = OpeningContext {
            license: Some(&license),
            ..Default::default()
        };

        let violations = check_constraints(
            &create_referral(),
            &create_opening(),
            &context,
            &MatchConstraints::DEFAULT,
        );
        assert_eq!(kinds(&violations), vec![ViolationKind::License]);
    }

    #[test]
    fn test_missing_license_is_not_a_violation() {
        let violations = check_constraints(
            &create_referral(),
            &create_opening(),
            &OpeningContext::default(),
            &MatchConstraints::DEFAULT,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_county_proximity() {
        let site = Site {
            id: "site1".to_string(),
            organization_id: "org1".to_string(),
            county: Some("Ramsey".to_string()),
            city: None,
        };
        let context = OpeningContext {
            site: Some(&site),
            ..Default::default()
        };
        let mut constraints = MatchConstraints {
            require_county_proximity: true,
            ..MatchConstraints::DEFAULT
        };

        // 30 mile representative distance is inside the 50 mile default
        assert!(check_constraints(&create_referral(), &create_opening(), &context, &constraints).is_empty());

        constraints.max_county_distance = 20.0;
        let violations = check_constraints(&create_referral(), &create_opening(), &context, &constraints);
        assert_eq!(kinds(&violations), vec![ViolationKind::County]);

        let violations = check_constraints(
            &create_referral(),
            &create_opening(),
            &OpeningContext::default(),
            &constraints,
        );
        assert_eq!(kinds(&violations), vec![ViolationKind::County]);
    }

    #[test]
    fn test_all_violations_reported() {
        let mut referral = create_referral();
        referral.age = Some(70);
        referral.funding_source = Some("DD".to_string());
        let mut opening = create_opening();
        opening.gender_requirement = Some("female".to_string());

        let violations = check_constraints(
            &referral,
            &opening,
            &OpeningContext::default(),
            &MatchConstraints::DEFAULT,
        );
        assert_eq!(
            kinds(&violations),
            vec![ViolationKind::Funding, ViolationKind::Gender, ViolationKind::Age]
        );
    }
}
