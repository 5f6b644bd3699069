//! Fortunecast Engine
//!
//! The aggregation and scoring engine: turns one day's facts into category
//! scores, and rolls many child-period reports into one parent-period report
//! while preserving statistically meaningful variance instead of flattening
//! it through naive averaging.
//!
//! # Components
//!
//! - [`scoring::ScoreCalculator`] - one unit's facts into category scores
//! - [`symbols::SymbolAggregator`] - ranked symbolic outputs
//! - [`clusterer::PeriodClusterer`] - maximal consecutive predicate runs
//! - [`volatility::VolatilityAnalyzer`] - dispersion and trend statistics
//! - [`patterns::TriggerPatternMiner`] - frequency-filtered interactions
//! - [`phases::PhaseAnalyzer`] - three-phase period characterization
//! - [`heatmap::HeatmapProjector`] - uniform time-indexed score arrays
//! - [`aggregator::ReportAggregator`] - the orchestrator rolling N children
//!   into one parent, recursively up to the chapter tier
//! - [`themes::ThemeMiner`] - recurring combination mining over long series
//!
//! Everything here is a deterministic function of its inputs: no I/O, no
//! shared mutable state, no hidden clock beyond the dates already present in
//! the inputs. Callers own any parallelism across independent requests.

pub mod aggregator;
pub mod clusterer;
pub mod heatmap;
pub mod patterns;
pub mod phases;
pub mod scoring;
pub mod symbols;
pub mod themes;
pub mod volatility;

pub use aggregator::ReportAggregator;
pub use scoring::ScoreCalculator;
pub use volatility::VolatilityAnalyzer;
