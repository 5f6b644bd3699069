//! Configuration for the fortunecast engine.
//!
//! The large favorability/label dictionaries of the domain are configuration,
//! not algorithm: they are injected here as constant resources so the scoring
//! and mining code stays generic over any such table.

mod aggregation;
mod scoring;
mod symbols;

pub use aggregation::AggregationConfig;
pub use scoring::{CycleAffinity, MarkerBonus, PillarWeights, ScoringConfig};
pub use symbols::{ElementSymbols, SymbolConfig};
