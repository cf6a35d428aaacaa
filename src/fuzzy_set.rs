use std::fmt;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::membership::MFunction;

pub const DEFAULT_SET_NAME: &str = "FuzzySet";

/// A fuzzy set `A = <membership function, support set>` under a linguistic name.
///
/// The crisp value of the set is computed once, when the set is created. Replacing
/// the function or the support afterwards does not touch it; call
/// [`FuzzySet::redefuz`] to bring it up to date.
#[derive(Clone, Debug)]
pub struct FuzzySet {
    name: String,
    m_function: MFunction,
    support: (f64, f64),
    defuz_value: f64,
}

impl FuzzySet {
    pub fn new(m_function: MFunction, support: (f64, f64), name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        check_support(support)?;

        let defuz_value = center_of_gravity(&m_function, support, &name)?;

        Ok(Self {
            name,
            m_function,
            support,
            defuz_value,
        })
    }

    /// A set named [`DEFAULT_SET_NAME`] over the unit interval
    pub fn unit(m_function: MFunction) -> Result<Self> {
        Self::new(m_function, (0., 1.), DEFAULT_SET_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn m_function(&self) -> &MFunction {
        &self.m_function
    }

    pub fn m_function_mut(&mut self) -> &mut MFunction {
        &mut self.m_function
    }

    pub fn set_m_function(&mut self, m_function: MFunction) {
        self.m_function = m_function;
    }

    pub fn support(&self) -> (f64, f64) {
        self.support
    }

    pub fn set_support(&mut self, support: (f64, f64)) -> Result<()> {
        check_support(support)?;
        self.support = support;

        Ok(())
    }

    pub fn with_support(mut self, support: (f64, f64)) -> Result<Self> {
        self.set_support(support)?;
        Ok(self)
    }

    /// Membership degree of `x` in this set
    pub fn mju(&self, x: f64) -> f64 {
        self.m_function.mju(x)
    }

    /// The cached crisp value of this set.
    pub fn defuz(&self) -> f64 {
        self.defuz_value
    }

    /// Recomputes the crisp value from the current function and support.
    ///
    /// On error the cached value is left as it was.
    pub fn redefuz(&mut self) -> Result<f64> {
        self.defuz_value = center_of_gravity(&self.m_function, self.support, &self.name)?;

        Ok(self.defuz_value)
    }
}

/// Renders as e.g. `Medium = <Bell(x, {"a": 0.35, "b": 0.5, "c": 0.6}), [0.0, 1.0]>`
impl fmt::Display for FuzzySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = <{}, [{:?}, {:?}]>",
            self.name, self.m_function, self.support.0, self.support.1
        )
    }
}

fn check_support((left, right): (f64, f64)) -> Result<()> {
    // also rejects NaN bounds
    if left < right && left.is_finite() && right.is_finite() {
        Ok(())
    } else {
        Err(FuzzyError::InvalidSupport { left, right })
    }
}

/// Center of gravity `∫x·mju(x)dx / ∫mju(x)dx` over the support.
///
/// Both integrals are right Riemann sums over `accuracy` equal steps: the left
/// border is never sampled, the right one always is.
fn center_of_gravity(m_function: &MFunction, (left, right): (f64, f64), name: &str) -> Result<f64> {
    let mut numerator = 0.;
    let mut denominator = 0.;

    for x in Linspace::new(left, right, m_function.accuracy() + 1).skip(1) {
        let mju = m_function.mju(x);

        numerator += x * mju;
        denominator += mju;
    }

    if denominator == 0. {
        return Err(FuzzyError::ZeroMembershipMass { name: name.to_owned() });
    }

    let value = numerator / denominator;

    log::debug!("defuzzificated {name} = <{m_function}, [{left}, {right}]> to {value}");

    Ok(value)
}
