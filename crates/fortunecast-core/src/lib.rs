//! Fortunecast Core Library
//!
//! Provides the domain types, error types, and configuration structures for
//! the fortunecast report engine.
//!
//! # Architecture
//!
//! This crate defines:
//! - Domain types (`DayFacts`, `FortuneScores`, `FortuneReport`, etc.)
//! - The unified error type (`FortunecastError`) and `Result` alias
//! - Configuration structures (`ScoringConfig`, `SymbolConfig`,
//!   `AggregationConfig`)
//!
//! The algorithms that turn facts into reports live in `fortunecast-engine`;
//! this crate carries no computation beyond type invariants and config
//! validation.
//!
//! # Example
//!
//! ```
//! use fortunecast_core::types::{Category, CategoryScore};
//!
//! let score = CategoryScore::from_raw(70.0, 30.0);
//! assert_eq!(score.net, 90.0);
//! assert_eq!(Category::all().len(), 5);
//! ```

pub mod config;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::{AggregationConfig, ScoringConfig, SymbolConfig};
pub use error::{ConfigError, FortunecastError, Result};
