//! Error types for the fortunecast crates.
//!
//! One unified error enum plus a configuration sub-error. Library code never
//! panics on bad input: preconditions surface as `Err`, and the scoring
//! pipeline itself is total - clamping is silent and every ratio defines a
//! zero-denominator fallback, so scoring has no error path at all.

use thiserror::Error;

use crate::types::{Category, Timeframe};

/// Result alias used across the fortunecast crates.
pub type Result<T> = std::result::Result<T, FortunecastError>;

/// Unified error for the fortunecast engine.
#[derive(Debug, Error)]
pub enum FortunecastError {
    /// Rolling up an empty child list is a precondition violation; the
    /// engine never substitutes a default report.
    #[error("cannot roll up an empty child list into a {target} report")]
    EmptyRollup {
        /// Tier the rollup was targeting.
        target: Timeframe,
    },

    /// Children of one rollup must share a tier.
    #[error("rollup children must share a timeframe: expected {expected}, found {found}")]
    MixedTimeframes {
        expected: Timeframe,
        found: Timeframe,
    },

    /// Children of one rollup must be at the tier directly below the target.
    #[error("{child} children cannot roll up into a {target} report")]
    TierMismatch { child: Timeframe, target: Timeframe },

    /// A fact date failed to parse. Rejected at ingestion so duration
    /// arithmetic downstream never sees it.
    #[error("invalid date {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },

    /// Configuration failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Each category's pillar-weight row must sum to 1.0.
    #[error("pillar weights for {category} sum to {sum}, expected 1.0")]
    WeightRowSum { category: Category, sum: f32 },

    /// Amplified-tier clamp bounds must be ordered.
    #[error("amplified clamp is inverted: min {min} > max {max}")]
    InvertedClamp { min: f32, max: f32 },

    /// Pattern frequency threshold must lie in (0, 100].
    #[error("pattern frequency threshold {pct}% outside (0, 100]")]
    BadThreshold { pct: f32 },
}
