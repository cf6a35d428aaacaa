//! Error types for fuzzy-routines

use thiserror::Error;

use crate::membership::{MembershipKind, Param};

/// Errors raised by the structural constructors and setters.
///
/// Value-level operators never return these; they yield `None` instead.
#[derive(Debug, Error)]
pub enum FuzzyError {
    /// A membership function was created or updated with an empty parameter map
    #[error("membership function {0} requires its parameters to be specified")]
    MissingParameters(MembershipKind),

    /// A single required parameter is absent when evaluating
    #[error("membership function {kind} requires parameter `{param}`")]
    MissingParameter { kind: MembershipKind, param: Param },

    /// Evaluation produced a value that is not a finite number
    #[error("membership function {kind} is not finite at x = {x}")]
    NonFinite { kind: MembershipKind, x: f64 },

    #[error("support set must be (left, right) with left < right, got ({left}, {right})")]
    InvalidSupport { left: f64, right: f64 },

    #[error("accuracy must be at least 1, got {0}")]
    InvalidAccuracy(usize),

    /// Center of gravity is undefined: the membership function integrates to zero
    #[error("fuzzy set `{name}` has zero membership mass over its support")]
    ZeroMembershipMass { name: String },

    #[error("fuzzy scale must contain at least one level")]
    EmptyScale,

    #[error("fuzzy scale contains duplicate level `{0}`")]
    DuplicateLevel(String),

    #[error("unknown membership function `{0}`")]
    UnknownFunction(String),

    #[error("unknown norm type `{0}`")]
    UnknownNorm(String),

    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type alias for fuzzy-routines operations
pub type Result<T> = std::result::Result<T, FuzzyError>;
