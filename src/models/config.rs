use serde::{Deserialize, Serialize};

/// Per-factor scoring weights. The defaults sum to 100, so a perfect match
/// scores 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub county_match: f64,
    pub funding_match: f64,
    pub gender_match: f64,
    pub age_match: f64,
    pub availability_match: f64,
    pub capability_match: f64,
    pub location_proximity: f64,
    pub placement_success: f64,
    pub preferences_match: f64,
    pub services_match: f64,
}

impl ScoringWeights {
    pub const DEFAULT: Self = Self {
        county_match: 18.0,
        funding_match: 18.0,
        gender_match: 12.0,
        age_match: 12.0,
        availability_match: 10.0,
        capability_match: 10.0,
        location_proximity: 8.0,
        placement_success: 6.0,
        preferences_match: 4.0,
        services_match: 2.0,
    };

    pub fn sum(&self) -> f64 {
        self.county_match
            + self.funding_match
            + self.gender_match
            + self.age_match
            + self.availability_match
            + self.capability_match
            + self.location_proximity
            + self.placement_success
            + self.preferences_match
            + self.services_match
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Hard gates evaluated before scoring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConstraints {
    pub require_funding_match: bool,
    pub require_county_proximity: bool,
    pub max_county_distance: f64,
    pub require_gender_match: bool,
    pub require_age_range_match: bool,
    pub require_verified_license: bool,
    pub max_distance_miles: f64,
}

impl MatchConstraints {
    pub const DEFAULT: Self = Self {
        require_funding_match: true,
        require_county_proximity: false,
        max_county_distance: 50.0,
        require_gender_match: true,
        require_age_range_match: true,
        require_verified_license: true,
        max_distance_miles: 100.0,
    };
}

impl Default for MatchConstraints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Quality bands and result cap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchThresholds {
    pub minimum_score: f64,
    pub good_score: f64,
    pub excellent_score: f64,
    pub max_results: usize,
}

impl MatchThresholds {
    pub const DEFAULT: Self = Self {
        minimum_score: 40.0,
        good_score: 70.0,
        excellent_score: 85.0,
        max_results: 10,
    };
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fully resolved configuration used by a match run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: ScoringWeights,
    pub constraints: MatchConstraints,
    pub thresholds: MatchThresholds,
}

impl MatchingConfig {
    pub const DEFAULT: Self = Self {
        weights: ScoringWeights::DEFAULT,
        constraints: MatchConstraints::DEFAULT,
        thresholds: MatchThresholds::DEFAULT,
    };

    /// Merge caller overrides over the system defaults
    pub fn resolve(overrides: &MatchingConfigOverrides) -> Self {
        Self::DEFAULT.merged(overrides)
    }

    /// Return a new config with `overrides` applied field by field over `self`
    pub fn merged(&self, overrides: &MatchingConfigOverrides) -> Self {
        let mut resolved = *self;
        if let Some(weights) = &overrides.weights {
            weights.apply(&mut resolved.weights);
        }
        if let Some(constraints) = &overrides.constraints {
            constraints.apply(&mut resolved.constraints);
        }
        if let Some(thresholds) = &overrides.thresholds {
            thresholds.apply(&mut resolved.thresholds);
        }
        resolved
    }

    /// Report questionable settings without rejecting them.
    ///
    /// The matcher scores with whatever it is given; these warnings are for
    /// configuration screens and logs.
    pub fn diagnostics(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let sum = self.weights.sum();
        if (sum - 100.0).abs() > 1e-6 {
            warnings.push(ConfigWarning::WeightSum { sum });
        }

        for factor in crate::models::Factor::ALL {
            let weight = factor.weight(&self.weights);
            if weight < 0.0 {
                warnings.push(ConfigWarning::NegativeWeight {
                    factor: factor.key().to_string(),
                    weight,
                });
            }
        }

        let t = &self.thresholds;
        if t.minimum_score > t.good_score || t.good_score > t.excellent_score {
            warnings.push(ConfigWarning::NonMonotonicThresholds {
                minimum_score: t.minimum_score,
                good_score: t.good_score,
                excellent_score: t.excellent_score,
            });
        }
        if t.max_results == 0 {
            warnings.push(ConfigWarning::ZeroResultCap);
        }

        warnings
    }
}

/// Non-fatal configuration problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigWarning {
    WeightSum { sum: f64 },
    NegativeWeight { factor: String, weight: f64 },
    NonMonotonicThresholds {
        minimum_score: f64,
        good_score: f64,
        excellent_score: f64,
    },
    ZeroResultCap,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::WeightSum { sum } => {
                write!(f, "weights sum to {} instead of 100", sum)
            }
            ConfigWarning::NegativeWeight { factor, weight } => {
                write!(f, "weight for {} is negative ({})", factor, weight)
            }
            ConfigWarning::NonMonotonicThresholds {
                minimum_score,
                good_score,
                excellent_score,
            } => write!(
                f,
                "thresholds are not increasing: minimum {}, good {}, excellent {}",
                minimum_score, good_score, excellent_score
            ),
            ConfigWarning::ZeroResultCap => write!(f, "max_results is 0, no matches will be returned"),
        }
    }
}

/// Partial configuration supplied by a caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfigOverrides {
    #[serde(default)]
    pub weights: Option<WeightOverrides>,
    #[serde(default)]
    pub constraints: Option<ConstraintOverrides>,
    #[serde(default)]
    pub thresholds: Option<ThresholdOverrides>,
}

impl MatchingConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.weights.is_none() && self.constraints.is_none() && self.thresholds.is_none()
    }
}

macro_rules! apply_fields {
    ($src:expr, $dst:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(value) = $src.$field {
                $dst.$field = value;
            }
        )*
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightOverrides {
    pub county_match: Option<f64>,
    pub funding_match: Option<f64>,
    pub gender_match: Option<f64>,
    pub age_match: Option<f64>,
    pub availability_match: Option<f64>,
    pub capability_match: Option<f64>,
    pub location_proximity: Option<f64>,
    pub placement_success: Option<f64>,
    pub preferences_match: Option<f64>,
    pub services_match: Option<f64>,
}

impl WeightOverrides {
    fn apply(&self, weights: &mut ScoringWeights) {
        apply_fields!(self, weights, [
            county_match,
            funding_match,
            gender_match,
            age_match,
            availability_match,
            capability_match,
            location_proximity,
            placement_success,
            preferences_match,
            services_match,
        ]);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintOverrides {
    pub require_funding_match: Option<bool>,
    pub require_county_proximity: Option<bool>,
    pub max_county_distance: Option<f64>,
    pub require_gender_match: Option<bool>,
    pub require_age_range_match: Option<bool>,
    pub require_verified_license: Option<bool>,
    pub max_distance_miles: Option<f64>,
}

impl ConstraintOverrides {
    fn apply(&self, constraints: &mut MatchConstraints) {
        apply_fields!(self, constraints, [
            require_funding_match,
            require_county_proximity,
            max_county_distance,
            require_gender_match,
            require_age_range_match,
            require_verified_license,
            max_distance_miles,
        ]);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOverrides {
    pub minimum_score: Option<f64>,
    pub good_score: Option<f64>,
    pub excellent_score: Option<f64>,
    /// Negative caps are clamped to 0
    pub max_results: Option<i64>,
}

impl ThresholdOverrides {
    fn apply(&self, thresholds: &mut MatchThresholds) {
        apply_fields!(self, thresholds, [minimum_score, good_score, excellent_score]);
        if let Some(cap) = self.max_results {
            thresholds.max_results = usize::try_from(cap.max(0)).unwrap_or(usize::MAX);
        }
    }
}
