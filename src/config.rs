//! Library defaults and fuzzy scale definitions, loadable from TOML.
//!
//! ```
//! use fuzzy_routines::FuzzyConfig;
//!
//! let config = FuzzyConfig::from_toml_str(r#"
//!     accuracy = 500
//!
//!     [[scales]]
//!     name = "Risk"
//!
//!     [[scales.levels]]
//!     name = "Low"
//!     function = "hyperbolic"
//!     params = { a = 7.0, b = 4.0, c = 0.0 }
//!     support = [0.0, 1.0]
//!
//!     [[scales.levels]]
//!     name = "High"
//!     function = "triangle"
//!     params = { a = 0.7, b = 1.0, c = 1.0 }
//!     support = [0.0, 1.0]
//! "#).unwrap();
//!
//! let scales = config.build_scales().unwrap();
//!
//! assert_eq!(scales[0].name(), "Risk");
//! assert_eq!(scales[0].fuzzy(0.9).name, "High");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fuzzy_set::FuzzySet;
use crate::membership::{MFunction, MembershipKind, Param, DEFAULT_ACCURACY};
use crate::ops::{self, SCoNorm, TNorm, NOT_ALPHA, PARABOLIC_EPSILON};
use crate::scale::{FuzzyScale, Level};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Integration steps used by defuzzification.
    pub accuracy: usize,

    /// `alpha` of [`FuzzyConfig::fuzzy_not`] and [`FuzzyConfig::fuzzy_not_parabolic`].
    pub not_alpha: f64,

    /// Search step of [`FuzzyConfig::fuzzy_not_parabolic`].
    pub parabolic_epsilon: f64,

    /// Operator of [`FuzzyConfig::conjunction`].
    pub t_norm: TNorm,

    /// Operator of [`FuzzyConfig::disjunction`].
    pub s_conorm: SCoNorm,

    /// User defined fuzzy scales.
    pub scales: Vec<ScaleConfig>,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_ACCURACY,
            not_alpha: NOT_ALPHA,
            parabolic_epsilon: PARABOLIC_EPSILON,
            t_norm: TNorm::default(),
            s_conorm: SCoNorm::default(),
            scales: Vec::new(),
        }
    }
}

impl FuzzyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Fuzzy NOT of `x` with the configured `alpha`.
    pub fn fuzzy_not(&self, x: f64) -> Option<f64> {
        ops::fuzzy_not(x, self.not_alpha)
    }

    /// Parabolic fuzzy NOT of `x` with the configured `alpha` and step.
    pub fn fuzzy_not_parabolic(&self, x: f64) -> Option<f64> {
        ops::fuzzy_not_parabolic(x, self.not_alpha, self.parabolic_epsilon)
    }

    /// Combines `values` with the configured t-norm.
    pub fn conjunction(&self, values: &[f64]) -> Option<f64> {
        self.t_norm.compose(values)
    }

    /// Combines `values` with the configured s-conorm.
    pub fn disjunction(&self, values: &[f64]) -> Option<f64> {
        self.s_conorm.compose(values)
    }

    /// Builds every configured scale with this configuration's accuracy.
    pub fn build_scales(&self) -> Result<Vec<FuzzyScale>> {
        self.scales.iter().map(|scale| scale.build(self.accuracy)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScaleConfig {
    pub name: String,
    pub levels: Vec<LevelConfig>,
}

impl ScaleConfig {
    pub fn build(&self, accuracy: usize) -> Result<FuzzyScale> {
        let levels = self
            .levels
            .iter()
            .map(|level| level.build(accuracy))
            .collect::<Result<Vec<_>>>()?;

        FuzzyScale::with_levels(self.name.clone(), levels)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LevelConfig {
    pub name: String,

    pub function: MembershipKind,

    #[serde(default)]
    pub params: ParamsConfig,

    #[serde(default = "unit_support")]
    pub support: [f64; 2],

    /// Name of the fuzzy set, if it differs from the level name.
    #[serde(default)]
    pub linguistic_name: Option<String>,
}

fn unit_support() -> [f64; 2] {
    [0., 1.]
}

/// Membership function parameters by name; absent ones are left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<f64>,
}

impl ParamsConfig {
    pub fn iter(&self) -> impl Iterator<Item = (Param, f64)> {
        [(Param::A, self.a), (Param::B, self.b), (Param::C, self.c), (Param::D, self.d)]
            .into_iter()
            .filter_map(|(param, value)| Some((param, value?)))
    }
}

impl LevelConfig {
    pub fn build(&self, accuracy: usize) -> Result<Level> {
        let m_function = MFunction::new(self.function, self.params.iter())?
            .with_accuracy(accuracy)?;
        let [left, right] = self.support;
        let set_name = self.linguistic_name.as_deref().unwrap_or(&self.name);
        let f_set = FuzzySet::new(m_function, (left, right), set_name)?;

        Ok(Level::new(self.name.clone(), f_set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FuzzyError;

    #[test]
    fn test_defaults() {
        let config = FuzzyConfig::from_toml_str("").unwrap();

        assert_eq!(config, FuzzyConfig::new());
        assert_eq!(config.accuracy, 1000);
        assert_eq!(config.not_alpha, 0.5);
        assert_eq!(config.parabolic_epsilon, 0.001);
        assert_eq!(config.t_norm, TNorm::Logic);
        assert_eq!(config.s_conorm, SCoNorm::Logic);
        assert!(config.build_scales().unwrap().is_empty());

        assert_eq!(config.fuzzy_not(0.25), Some(0.75));
        assert_eq!(config.conjunction(&[0.3, 0.6]), Some(0.3));
        assert_eq!(config.disjunction(&[0.3, 0.6]), Some(0.6));
    }

    #[test]
    fn test_operator_settings_take_effect() {
        let config = FuzzyConfig::from_toml_str(
            r#"
            not_alpha = 0.75
            parabolic_epsilon = 0.25
            t_norm = "algebraic"
            s_conorm = "boundary"
            "#,
        )
        .unwrap();

        assert_eq!(config.fuzzy_not(0.25), ops::fuzzy_not(0.25, 0.75));
        assert_ne!(config.fuzzy_not(0.25), Some(0.75));
        assert_eq!(config.fuzzy_not_parabolic(0.5), ops::fuzzy_not_parabolic(0.5, 0.75, 0.25));
        assert_eq!(config.conjunction(&[0.5, 0.5]), Some(0.25));
        assert_eq!(config.disjunction(&[0.5, 0.75]), Some(1.));
        assert!(FuzzyConfig::from_toml_str(r#"t_norm = "lukasiewicz""#).is_err());
    }

    #[test]
    fn test_scale_from_toml() {
        let config = FuzzyConfig::from_toml_str(
            r#"
            accuracy = 200

            [[scales]]
            name = "New Scale"

            [[scales.levels]]
            name = "min"
            function = "hyperbolic"
            params = { a = 2.0, b = 20.0, c = 0.0 }
            support = [0.0, 0.5]

            [[scales.levels]]
            name = "med"
            function = "bell"
            params = { a = 0.4, b = 0.55, c = 0.7 }
            support = [0.25, 0.75]
            linguistic_name = "Medium"

            [[scales.levels]]
            name = "max"
            function = "triangle"
            params = { a = 0.65, b = 1.0, c = 1.0 }
            support = [0.7, 1.0]
            "#,
        )
        .unwrap();

        let scales = config.build_scales().unwrap();
        let scale = &scales[0];
        let names: Vec<_> = scale.levels().map(|level| level.name.as_str()).collect();

        assert_eq!(scale.name(), "New Scale");
        assert_eq!(names, ["min", "med", "max"]);
        assert_eq!(scale.fuzzy(0.6).name, "med");

        let med = scale.get_level_by_name("MED", false).unwrap();
        assert_eq!(med.f_set.name(), "Medium");
        assert_eq!(med.f_set.m_function().accuracy(), 200);
        assert_eq!(med.f_set.m_function().parameter(Param::B), Some(0.55));
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            FuzzyConfig::from_toml_str("accuracy = \"many\""),
            Err(FuzzyError::Config(_))
        ));
        assert!(matches!(
            FuzzyConfig::from_toml_str(
                r#"
                [[scales]]
                name = "S"
                [[scales.levels]]
                name = "x"
                function = "gaussian"
                params = { a = 1.0 }
                "#
            ),
            Err(FuzzyError::Config(_))
        ));
        assert!(matches!(
            FuzzyConfig::from_toml_str(
                r#"
                [[scales]]
                name = "S"
                [[scales.levels]]
                name = "x"
                function = "sigmoidal"
                params = { a = 1.0, e = 2.0 }
                "#
            ),
            Err(FuzzyError::Config(_))
        ));

        let level = |name: &str| LevelConfig {
            name: name.to_owned(),
            function: MembershipKind::Sigmoidal,
            params: ParamsConfig {
                a: Some(10.),
                b: Some(0.5),
                ..ParamsConfig::default()
            },
            support: [0., 1.],
            linguistic_name: None,
        };
        let duplicated = ScaleConfig {
            name: "S".to_owned(),
            levels: vec![level("x"), level("x")],
        };
        assert!(matches!(duplicated.build(100), Err(FuzzyError::DuplicateLevel(_))));

        let mut no_params = level("y");
        no_params.params = ParamsConfig::default();
        assert!(matches!(no_params.build(100), Err(FuzzyError::MissingParameters(_))));

        let mut reversed = level("z");
        reversed.support = [1., 0.];
        assert!(matches!(reversed.build(100), Err(FuzzyError::InvalidSupport { .. })));

        assert!(matches!(level("w").build(0), Err(FuzzyError::InvalidAccuracy(0))));
    }
}
