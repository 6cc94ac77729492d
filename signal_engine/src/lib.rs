//! Indicator and signal engine.
//!
//! [`engine::analyze`] takes a cleaned [`BarSeries`](market_data_ingestor::models::bar_series::BarSeries)
//! and an [`request::AnalysisRequest`] and returns indicators, Fibonacci
//! levels, a pattern label, a heuristic score and a position projection.
//! Nothing here does I/O.

pub mod breakout;
pub mod config;
pub mod engine;
pub mod fibonacci;
pub mod frame;
pub mod indicators;
pub mod pattern;
pub mod projection;
pub mod request;
pub mod score;

pub use config::EngineConfig;
pub use engine::{AnalysisResult, analyze, analyze_table};
pub use request::{AnalysisRequest, Horizon, Strategy};
