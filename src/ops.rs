use std::fmt;
use std::str::FromStr;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::error::FuzzyError;

/// Default `alpha` of the fuzzy NOT operators. At 0.5 NOT reduces to `1 - x`.
pub const NOT_ALPHA: f64 = 0.5;

/// Default search step of [`fuzzy_not_parabolic`].
pub const PARABOLIC_EPSILON: f64 = 0.001;

fn show<F: Float>(value: F) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Returns true if `value` is a usable real number, i.e. neither NaN nor infinite.
pub fn is_number<F: Float>(value: F) -> bool {
    value.is_finite()
}

/// All operations in fuzzy logic are executed with numbers in the interval [0, 1].
pub fn is_correct_fuzzy_number<F: Float>(value: F) -> bool {
    if is_number(value) && F::zero() <= value && value <= F::one() {
        return true;
    }

    log::warn!("{} is not a real number in [0, 1]", show(value));

    false
}

/// Fuzzy logic NOT operator. Equals `1 - x` when `alpha` is 0.5.
pub fn fuzzy_not<F: Float>(x: F, alpha: F) -> Option<F> {
    if !(is_correct_fuzzy_number(x) && is_correct_fuzzy_number(alpha) && alpha > F::zero()) {
        return None;
    }

    if x <= alpha {
        Some(x * (alpha - F::one()) / alpha + F::one())
    } else {
        Some((x - F::one()) * alpha / (alpha - F::one()))
    }
}

/// Parabolic fuzzy NOT operator, the `y` solving `2a - x - y = (2a - 1)(y - x)^2`.
///
/// The root is found by a forward scan from `y = 0` in steps of `epsilon`, so the
/// answer is exact only to within one step and the cost grows as `1 / epsilon`.
/// If no root lies in [0, 1] the first step past 1 is returned. A step too small
/// to move `y` in floating point gives `None`.
pub fn fuzzy_not_parabolic<F: Float>(x: F, alpha: F, epsilon: F) -> Option<F> {
    if !(is_correct_fuzzy_number(x)
        && is_correct_fuzzy_number(alpha)
        && is_correct_fuzzy_number(epsilon)
        && alpha > F::zero())
    {
        return None;
    }

    if x == F::zero() {
        return Some(F::one());
    }
    if x == F::one() {
        return Some(F::zero());
    }
    // y stays below 1 + epsilon, where a step that moves 1 moves every y
    if F::one() + epsilon == F::one() {
        log::warn!("parabolic NOT of {} cannot be searched with step {}", show(x), show(epsilon));
        return None;
    }

    let two = F::one() + F::one();
    let tolerance = epsilon / two;
    let residual = |y: F| ((two * alpha - x - y) - (two * alpha - F::one()) * (y - x).powi(2)).abs();
    let mut y = F::zero();

    while y <= F::one() && residual(y) >= tolerance {
        y = y + epsilon;
    }

    log::trace!("parabolic NOT({}, alpha = {}) = {}", show(x), show(alpha), show(y));

    Some(y)
}

/// Fuzzy AND is the minimum of two numbers. Not restricted to [0, 1].
pub fn fuzzy_and<F: Float>(a: F, b: F) -> Option<F> {
    if is_number(a) && is_number(b) {
        Some(F::min(a, b))
    } else {
        None
    }
}

/// Fuzzy OR is the maximum of two numbers. Not restricted to [0, 1].
pub fn fuzzy_or<F: Float>(a: F, b: F) -> Option<F> {
    if is_number(a) && is_number(b) {
        Some(F::max(a, b))
    } else {
        None
    }
}

/// T-norm conjunctive operators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TNorm {
    /// Fuzzy logic AND (minimum)
    #[default]
    Logic,
    /// Algebraic multiplication
    Algebraic,
    /// Boundary multiplication, `max(a + b - 1, 0)`
    Boundary,
    /// Drastic multiplication
    Drastic,
}

impl TNorm {
    pub fn call<F: Float>(self, a: F, b: F) -> Option<F> {
        if !(is_correct_fuzzy_number(a) && is_correct_fuzzy_number(b)) {
            return None;
        }

        let value = match self {
            Self::Logic => F::min(a, b),
            Self::Algebraic => a * b,
            Self::Boundary => F::max(a + b - F::one(), F::zero()),
            Self::Drastic => {
                if a == F::one() {
                    b
                } else if b == F::one() {
                    a
                } else {
                    F::zero()
                }
            },
        };

        Some(value)
    }

    /// Left fold of [`TNorm::call`] over `values`, seeded with the first one.
    ///
    /// An invalid operand anywhere makes the whole composition `None`.
    pub fn compose<F: Float>(self, values: &[F]) -> Option<F> {
        let (&first, rest) = values.split_first()?;
        let seed = is_number(first).then_some(first);

        rest.iter().fold(seed, |acc, &v| acc.and_then(|acc| self.call(acc, v)))
    }
}

/// S-conorm disjunctive operators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SCoNorm {
    /// Fuzzy logic OR (maximum)
    #[default]
    Logic,
    /// Algebraic addition, `a + b - ab`
    Algebraic,
    /// Boundary addition, `min(a + b, 1)`
    Boundary,
    /// Drastic addition
    Drastic,
}

impl SCoNorm {
    pub fn call<F: Float>(self, a: F, b: F) -> Option<F> {
        if !(is_correct_fuzzy_number(a) && is_correct_fuzzy_number(b)) {
            return None;
        }

        let value = match self {
            Self::Logic => F::max(a, b),
            Self::Algebraic => a + b - a * b,
            Self::Boundary => F::min(a + b, F::one()),
            Self::Drastic => {
                if a == F::zero() {
                    b
                } else if b == F::zero() {
                    a
                } else {
                    F::one()
                }
            },
        };

        Some(value)
    }

    /// Left fold of [`SCoNorm::call`] over `values`, seeded with the first one.
    pub fn compose<F: Float>(self, values: &[F]) -> Option<F> {
        let (&first, rest) = values.split_first()?;
        let seed = is_number(first).then_some(first);

        rest.iter().fold(seed, |acc, &v| acc.and_then(|acc| self.call(acc, v)))
    }
}

impl fmt::Display for TNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Logic => "logic",
            Self::Algebraic => "algebraic",
            Self::Boundary => "boundary",
            Self::Drastic => "drastic",
        })
    }
}

impl fmt::Display for SCoNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Logic => "logic",
            Self::Algebraic => "algebraic",
            Self::Boundary => "boundary",
            Self::Drastic => "drastic",
        })
    }
}

impl FromStr for TNorm {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "logic" => Ok(Self::Logic),
            "algebraic" => Ok(Self::Algebraic),
            "boundary" => Ok(Self::Boundary),
            "drastic" => Ok(Self::Drastic),
            _ => Err(FuzzyError::UnknownNorm(s.to_owned())),
        }
    }
}

impl FromStr for SCoNorm {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "logic" => Ok(Self::Logic),
            "algebraic" => Ok(Self::Algebraic),
            "boundary" => Ok(Self::Boundary),
            "drastic" => Ok(Self::Drastic),
            _ => Err(FuzzyError::UnknownNorm(s.to_owned())),
        }
    }
}
