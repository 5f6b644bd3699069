//! Domain types for the fortunecast engine.
//!
//! Split by concern:
//! - `facts` - per-day inputs (`DayFacts`, elements, markers, cycle state)
//! - `score` - category scores and the fixed score map
//! - `symbols` - ranked symbolic outputs
//! - `analysis` - statistical metadata attached to aggregated reports
//! - `report` - the immutable report model

mod analysis;
mod facts;
mod report;
mod score;
mod symbols;

pub use analysis::{
    AggregationMetadata, ConcentrationPhase, HeatmapCell, MarkerWindow, PatternFilterStats,
    PhaseCharacter, PhasePosition, PhaseSummary, SignificantPeriod, ThemePattern,
    ThemeSignificance, Trend, TriggerPattern, VolatilityStats, WindowKind,
};
pub use facts::{
    CycleReading, DayFacts, Element, Favorability, Interaction, PillarSlot, SlotInteractions,
    SpecialMarker,
};
pub use report::{
    BasisInteraction, CycleTransition, FactualBasis, FortuneReport, ReportMeta, Timeframe,
};
pub use score::{leaf_net, Category, CategoryScore, FortuneScores, NEUTRAL_MIDPOINT};
pub use symbols::{LuckySymbols, SymbolShare};
