use std::fmt;
use std::str::FromStr;

use fixed_map::{Key, Map};
use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};

/// Number of integration steps used when defuzzificating a fuzzy set
pub const DEFAULT_ACCURACY: usize = 1000;

/// Name of a membership function parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Key)]
pub enum Param {
    A,
    B,
    C,
    D,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
        })
    }
}

pub type Parameters = Map<Param, f64>;

/// The fixed catalog of membership function shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipKind {
    /// `1` up to `c`, then `1 / (1 + (a(x - c))^b)`
    Hyperbolic,
    /// Parabolic ramp up to `b`, flat on `[b, c]`, mirrored ramp down after `c`
    Bell,
    /// Saturating quadratic S-curve from `a` to `b`
    Parabolic,
    /// Rises from `a` to a peak at `c`, falls to zero at `b`
    Triangle,
    /// Rises from `a` to `c`, flat on `[c, d]`, falls to zero at `b`
    Trapezium,
    /// Gaussian `exp(-((x - a) / b)^2 / 2)`
    Exponential,
    /// Logistic `1 / (1 + exp(-a(x - b)))`
    Sigmoidal,
    /// Harrington's desirability `exp(-exp(-y))`, takes no parameters
    Desirability,
}

impl MembershipKind {
    pub const ALL: [MembershipKind; 8] = [
        Self::Hyperbolic,
        Self::Bell,
        Self::Parabolic,
        Self::Triangle,
        Self::Trapezium,
        Self::Exponential,
        Self::Sigmoidal,
        Self::Desirability,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hyperbolic => "Hyperbolic",
            Self::Bell => "Bell",
            Self::Parabolic => "Parabolic",
            Self::Triangle => "Triangle",
            Self::Trapezium => "Trapezium",
            Self::Exponential => "Exponential",
            Self::Sigmoidal => "Sigmoidal",
            Self::Desirability => "Desirability",
        }
    }

    pub fn requires_parameters(self) -> bool {
        self != Self::Desirability
    }
}

impl fmt::Display for MembershipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MembershipKind {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FuzzyError::UnknownFunction(s.to_owned()))
    }
}

/// A named membership function with its parameters.
///
/// The shape is chosen once at construction. Parameters can be replaced
/// afterwards, but never emptied unless the shape takes none.
#[derive(Clone, Debug)]
pub struct MFunction {
    kind: MembershipKind,
    parameters: Parameters,
    accuracy: usize,
}

impl MFunction {
    pub fn new(kind: MembershipKind, parameters: impl IntoIterator<Item = (Param, f64)>) -> Result<Self> {
        let parameters = collect_parameters(parameters);

        check_parameters(kind, &parameters)?;

        Ok(Self::from_parts(kind, parameters))
    }

    fn from_parts(kind: MembershipKind, parameters: Parameters) -> Self {
        Self {
            kind,
            parameters,
            accuracy: DEFAULT_ACCURACY,
        }
    }

    pub fn hyperbolic(a: f64, b: f64, c: f64) -> Self {
        let params = [(Param::A, a), (Param::B, b), (Param::C, c)];
        Self::from_parts(MembershipKind::Hyperbolic, collect_parameters(params))
    }

    pub fn bell(a: f64, b: f64, c: f64) -> Self {
        let params = [(Param::A, a), (Param::B, b), (Param::C, c)];
        Self::from_parts(MembershipKind::Bell, collect_parameters(params))
    }

    pub fn parabolic(a: f64, b: f64) -> Self {
        let params = [(Param::A, a), (Param::B, b)];
        Self::from_parts(MembershipKind::Parabolic, collect_parameters(params))
    }

    /// Peak at `c`, zero outside `(a, b)`. Expects `a < c < b` but doesn't check it.
    pub fn triangle(a: f64, b: f64, c: f64) -> Self {
        let params = [(Param::A, a), (Param::B, b), (Param::C, c)];
        Self::from_parts(MembershipKind::Triangle, collect_parameters(params))
    }

    pub fn trapezium(a: f64, b: f64, c: f64, d: f64) -> Self {
        let params = [(Param::A, a), (Param::B, b), (Param::C, c), (Param::D, d)];
        Self::from_parts(MembershipKind::Trapezium, collect_parameters(params))
    }

    pub fn exponential(a: f64, b: f64) -> Self {
        let params = [(Param::A, a), (Param::B, b)];
        Self::from_parts(MembershipKind::Exponential, collect_parameters(params))
    }

    pub fn sigmoidal(a: f64, b: f64) -> Self {
        let params = [(Param::A, a), (Param::B, b)];
        Self::from_parts(MembershipKind::Sigmoidal, collect_parameters(params))
    }

    pub fn desirability() -> Self {
        Self::from_parts(MembershipKind::Desirability, Map::new())
    }

    pub fn kind(&self) -> MembershipKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameter(&self, param: Param) -> Option<f64> {
        self.parameters.get(param).copied()
    }

    /// Replaces all parameters. On error the current ones are kept.
    pub fn set_parameters(&mut self, parameters: impl IntoIterator<Item = (Param, f64)>) -> Result<()> {
        let parameters = collect_parameters(parameters);

        check_parameters(self.kind, &parameters)?;
        self.parameters = parameters;

        Ok(())
    }

    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = (Param, f64)>) -> Result<Self> {
        self.set_parameters(parameters)?;
        Ok(self)
    }

    pub fn accuracy(&self) -> usize {
        self.accuracy
    }

    pub fn set_accuracy(&mut self, accuracy: usize) -> Result<()> {
        if accuracy == 0 {
            return Err(FuzzyError::InvalidAccuracy(accuracy));
        }

        self.accuracy = accuracy;

        Ok(())
    }

    pub fn with_accuracy(mut self, accuracy: usize) -> Result<Self> {
        self.set_accuracy(accuracy)?;
        Ok(self)
    }

    /// Membership degree of `x`.
    ///
    /// Never fails: a missing parameter or a non-finite result is logged and
    /// evaluates to `0`.
    pub fn mju(&self, x: f64) -> f64 {
        match self.eval(x) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("{err}; {self} evaluated to 0");
                0.
            },
        }
    }

    /// Membership degree of `x`, reporting why it could not be computed.
    pub fn eval(&self, x: f64) -> Result<f64> {
        use Param::*;

        let value = match self.kind {
            MembershipKind::Hyperbolic => {
                let [a, b, c] = self.require([A, B, C])?;
                hyperbolic(x, a, b, c)
            },
            MembershipKind::Bell => {
                let [a, b, c] = self.require([A, B, C])?;
                bell(x, a, b, c)
            },
            MembershipKind::Parabolic => {
                let [a, b] = self.require([A, B])?;
                parabolic(x, a, b)
            },
            MembershipKind::Triangle => {
                let [a, b, c] = self.require([A, B, C])?;
                triangle(x, a, b, c)
            },
            MembershipKind::Trapezium => {
                let [a, b, c, d] = self.require([A, B, C, D])?;
                trapezium(x, a, b, c, d)
            },
            MembershipKind::Exponential => {
                let [a, b] = self.require([A, B])?;
                exponential(x, a, b)
            },
            MembershipKind::Sigmoidal => {
                let [a, b] = self.require([A, B])?;
                sigmoidal(x, a, b)
            },
            MembershipKind::Desirability => desirability(x),
        };

        if !value.is_finite() {
            return Err(FuzzyError::NonFinite { kind: self.kind, x });
        }

        Ok(value)
    }

    fn require<const N: usize>(&self, params: [Param; N]) -> Result<[f64; N]> {
        let mut values = [0.; N];

        for (value, param) in values.iter_mut().zip(params) {
            *value = self.parameter(param).ok_or(FuzzyError::MissingParameter {
                kind: self.kind,
                param,
            })?;
        }

        Ok(values)
    }
}

fn collect_parameters(parameters: impl IntoIterator<Item = (Param, f64)>) -> Parameters {
    let mut map = Map::new();

    for (param, value) in parameters {
        map.insert(param, value);
    }

    map
}

fn check_parameters(kind: MembershipKind, parameters: &Parameters) -> Result<()> {
    if kind.requires_parameters() && parameters.is_empty() {
        return Err(FuzzyError::MissingParameters(kind));
    }

    Ok(())
}

/// Renders as e.g. `Bell(x, {"a": 0.6, "b": 0.66, "c": 0.77})` or `Desirability(y)`
impl fmt::Display for MFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.kind.requires_parameters() {
            return write!(f, "{}(y)", self.name());
        }

        write!(f, "{}(x, {{", self.name())?;

        for (i, (param, value)) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{param}\": {value}")?;
        }

        f.write_str("})")
    }
}

fn hyperbolic(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x <= c {
        1.
    } else {
        1. / (1. + (a * (x - c)).powf(b))
    }
}

fn bell(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x < b {
        parabolic(x, a, b)
    } else if x <= c {
        1.
    } else {
        // right slope is the left one mirrored onto [c, c + b - a]
        1. - parabolic(x, c, c + b - a)
    }
}

fn parabolic(x: f64, a: f64, b: f64) -> f64 {
    let width = (b - a).powi(2);

    if x <= a {
        0.
    } else if x <= (a + b) / 2. {
        2. * (x - a).powi(2) / width
    } else if x < b {
        1. - 2. * (x - b).powi(2) / width
    } else {
        1.
    }
}

fn triangle(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x <= a {
        0.
    } else if x <= c {
        (x - a) / (c - a)
    } else if x < b {
        (b - x) / (b - c)
    } else {
        0.
    }
}

fn trapezium(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x < a {
        0.
    } else if a < x && x < c {
        (x - a) / (c - a)
    } else if c <= x && x <= d {
        1.
    } else if d < x && x <= b {
        (b - x) / (b - d)
    } else {
        0.
    }
}

fn exponential(x: f64, a: f64, b: f64) -> f64 {
    if b == 0. {
        return 0.;
    }

    (-0.5 * ((x - a) / b).powi(2)).exp()
}

fn sigmoidal(x: f64, a: f64, b: f64) -> f64 {
    1. / (1. + (-a * (x - b)).exp())
}

fn desirability(y: f64) -> f64 {
    (-(-y).exp()).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_triangle() {
        let f = MFunction::new(MembershipKind::Triangle, [(Param::A, 0.2), (Param::B, 0.8), (Param::C, 0.5)]).unwrap();

        assert_eq!(f.mju(0.2), 0.);
        assert_eq!(f.mju(0.8), 0.);
        assert_eq!(f.mju(0.5), 1.);
        assert_close(f.mju(0.35), 0.5);
        assert_close(f.mju(0.65), 0.5);
        assert_eq!(f.mju(-3.), 0.);
    }

    #[test]
    fn test_parabolic_saturates() {
        let f = MFunction::parabolic(0., 1.);

        assert_eq!(f.mju(0.), 0.);
        assert_eq!(f.mju(0.5), 0.5);
        assert_close(f.mju(0.75), 0.875);
        assert_eq!(f.mju(1.), 1.);
        assert_eq!(f.mju(5.), 1.);
    }

    #[test]
    fn test_bell_is_symmetric_around_plateau() {
        let f = MFunction::bell(0.35, 0.5, 0.6);

        assert_eq!(f.mju(0.55), 1.);
        assert_eq!(f.mju(0.5), 1.);
        assert_eq!(f.mju(0.6), 1.);
        assert_close(f.mju(0.4), 2. / 9.);
        assert_close(f.mju(0.7), 2. / 9.);
        assert_eq!(f.mju(0.3), 0.);
        assert_eq!(f.mju(0.8), 0.);
        // evaluating the right slope leaves the parameters untouched
        assert_eq!(f.parameter(Param::A), Some(0.35));
        assert_eq!(f.parameter(Param::B), Some(0.5));
    }

    #[test]
    fn test_hyperbolic() {
        let f = MFunction::hyperbolic(7., 4., 0.);

        assert_eq!(f.mju(-1.), 1.);
        assert_eq!(f.mju(0.), 1.);
        assert_close(f.mju(1. / 7.), 0.5);
        assert!(f.mju(1.) < 1e-3);
    }

    #[test]
    fn test_trapezium() {
        let f = MFunction::trapezium(0.1, 1., 0.5, 0.8);

        assert_eq!(f.mju(0.05), 0.);
        assert_eq!(f.mju(0.1), 0.);
        assert_close(f.mju(0.3), 0.5);
        assert_eq!(f.mju(0.5), 1.);
        assert_eq!(f.mju(0.8), 1.);
        assert_close(f.mju(0.9), 0.5);
        assert_eq!(f.mju(1.), 0.);
        assert_eq!(f.mju(1.5), 0.);
    }

    #[test]
    fn test_exponential_sigmoidal_desirability() {
        assert_eq!(MFunction::exponential(0.5, 0.15).mju(0.5), 1.);
        assert_close(MFunction::exponential(0., 1.).mju(1.), (-0.5f64).exp());
        assert_eq!(MFunction::exponential(0.5, 0.).mju(0.5), 0.);
        assert_eq!(MFunction::sigmoidal(15., 0.5).mju(0.5), 0.5);
        assert!(MFunction::sigmoidal(15., 0.5).mju(1.) > 0.99);
        assert_close(MFunction::desirability().mju(0.), (-1f64).exp());
    }

    #[test]
    fn test_faults_degrade_to_zero() {
        // negative base to a fractional power is NaN
        let f = MFunction::hyperbolic(-1., 0.5, 0.);
        assert!(matches!(f.eval(1.), Err(FuzzyError::NonFinite { .. })));
        assert_eq!(f.mju(1.), 0.);

        let f = MFunction::new(MembershipKind::Triangle, [(Param::A, 0.1)]).unwrap();
        assert!(matches!(
            f.eval(0.5),
            Err(FuzzyError::MissingParameter { param: Param::B, .. })
        ));
        assert_eq!(f.mju(0.5), 0.);

        // overflow inside exp saturates instead of faulting
        assert_eq!(MFunction::sigmoidal(-1000., 0.).mju(1.), 0.);
        assert_eq!(MFunction::desirability().mju(-1000.), 0.);
    }

    #[test]
    fn test_parameters_are_required() {
        let empty: [(Param, f64); 0] = [];

        for kind in MembershipKind::ALL {
            let result = MFunction::new(kind, empty);

            if kind == MembershipKind::Desirability {
                assert!(result.is_ok());
            } else {
                assert!(matches!(result, Err(FuzzyError::MissingParameters(k)) if k == kind));
            }
        }

        let mut f = MFunction::triangle(0.2, 0.8, 0.5);
        assert!(f.set_parameters(empty).is_err());
        assert_eq!(f.parameter(Param::C), Some(0.5));

        f.set_parameters([(Param::A, 0.), (Param::B, 1.), (Param::C, 0.25)]).unwrap();
        assert_eq!(f.mju(0.25), 1.);

        let mut d = MFunction::desirability();
        assert!(d.set_parameters(empty).is_ok());
    }

    #[test]
    fn test_accuracy() {
        let f = MFunction::sigmoidal(1., 0.);
        assert_eq!(f.accuracy(), DEFAULT_ACCURACY);

        let f = f.with_accuracy(10).unwrap();
        assert_eq!(f.accuracy(), 10);
        assert!(matches!(f.with_accuracy(0), Err(FuzzyError::InvalidAccuracy(0))));
    }

    #[test]
    fn test_display_and_names() {
        assert_eq!(
            MFunction::bell(0.6, 0.66, 0.77).to_string(),
            r#"Bell(x, {"a": 0.6, "b": 0.66, "c": 0.77})"#
        );
        assert_eq!(MFunction::desirability().to_string(), "Desirability(y)");
        assert_eq!("triangle".parse::<MembershipKind>().ok(), Some(MembershipKind::Triangle));
        assert_eq!("Bell".parse::<MembershipKind>().ok(), Some(MembershipKind::Bell));
        assert!(matches!(
            "gauss".parse::<MembershipKind>(),
            Err(FuzzyError::UnknownFunction(_))
        ));
    }
}
