//! Market data ingestion: a vendor-agnostic OHLCV model, the [`DataProvider`]
//! seam, concrete providers, and the normalizer that maps vendor tables onto
//! clean bars.
//!
//! [`DataProvider`]: providers::DataProvider

pub mod models;
pub mod normalize;
pub mod providers;
