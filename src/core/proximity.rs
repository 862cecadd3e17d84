/// Distance assumed between any two different counties, in miles.
///
/// Site coordinates are not tracked, so every inter-county pair gets the same
/// representative figure.
pub const REPRESENTATIVE_COUNTY_DISTANCE_MILES: f64 = 30.0;

/// Travel distance assumed when the referral does not state one
pub const DEFAULT_PREFERRED_DISTANCE_MILES: f64 = 25.0;

/// Estimated distance between two counties.
///
/// Returns `None` when either county is unknown.
#[inline]
pub fn county_distance_miles(from: Option<&str>, to: Option<&str>) -> Option<f64> {
    let (from, to) = (from?, to?);
    if from.trim().is_empty() || to.trim().is_empty() {
        return None;
    }

    if same_county(from, to) {
        Some(0.0)
    } else {
        Some(REPRESENTATIVE_COUNTY_DISTANCE_MILES)
    }
}

#[inline]
pub fn same_county(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Share of the proximity weight earned at `distance_miles` for a client
/// willing to travel `preferred_miles`
pub fn proximity_ratio(distance_miles: f64, preferred_miles: f64) -> f64 {
    if distance_miles <= 0.0 {
        1.0
    } else if distance_miles <= preferred_miles {
        0.7
    } else if distance_miles <= preferred_miles * 2.0 {
        0.4
    } else {
        0.3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_county_is_zero() {
        assert_eq!(county_distance_miles(Some("Hennepin"), Some("hennepin ")), Some(0.0));
    }

    #[test]
    fn test_different_county_is_representative() {
        assert_eq!(
            county_distance_miles(Some("Hennepin"), Some("Ramsey")),
            Some(REPRESENTATIVE_COUNTY_DISTANCE_MILES)
        );
    }

    #[test]
    fn test_missing_county() {
        assert_eq!(county_distance_miles(None, Some("Ramsey")), None);
        assert_eq!(county_distance_miles(Some(""), Some("Ramsey")), None);
    }

    #[test]
    fn test_proximity_ratio_bands() {
        assert_eq!(proximity_ratio(0.0, 25.0), 1.0);
        assert_eq!(proximity_ratio(30.0, 50.0), 0.7);
        assert_eq!(proximity_ratio(30.0, 25.0), 0.4);
        assert_eq!(proximity_ratio(30.0, 10.0), 0.3);
    }
}
