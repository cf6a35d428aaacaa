//! Fuzzy logic routines: truth-value operators, a catalog of membership
//! functions, fuzzy sets with center-of-gravity defuzzification, and fuzzy
//! scales that classify a crisp number into a linguistic level.
//!
//! ```
//! use fuzzy_routines::{MFunction, FuzzySet, TNorm, UniversalFuzzyScale};
//!
//! assert_eq!(TNorm::Logic.compose(&[0.1, 0.2, 0.3]), Some(0.1));
//!
//! let set = FuzzySet::new(MFunction::triangle(0.2, 0.8, 0.5), (0., 1.), "Middle").unwrap();
//! assert!((set.defuz() - 0.5).abs() < 1e-6);
//!
//! let scale = UniversalFuzzyScale::new();
//! assert_eq!(scale.fuzzy(0.5).name, "Med");
//! ```

mod config;
mod diapason;
mod error;
mod fuzzy_set;
mod linspace;
mod membership;
mod ops;
mod scale;

pub use config::{FuzzyConfig, LevelConfig, ParamsConfig, ScaleConfig};
pub use diapason::parse_diapason;
pub use error::{FuzzyError, Result};
pub use fuzzy_set::{FuzzySet, DEFAULT_SET_NAME};
pub use membership::{MFunction, MembershipKind, Param, Parameters, DEFAULT_ACCURACY};
pub use ops::{
    fuzzy_and, fuzzy_not, fuzzy_not_parabolic, fuzzy_or, is_correct_fuzzy_number, is_number, SCoNorm, TNorm,
    NOT_ALPHA, PARABOLIC_EPSILON,
};
pub use scale::{FuzzyScale, Level, LevelKey, UniversalFuzzyScale};
