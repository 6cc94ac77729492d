//! Keyless chart endpoint (`/v8/finance/chart/{symbol}`).
//!
//! Serves US and Taiwan (`.TW`) listings. Requests are paced by a
//! process-local rate limiter so that scanning a watchlist stays polite.

pub mod provider;
pub mod response;
