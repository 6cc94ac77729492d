//! Alpaca market data REST provider (`/v2/stocks/bars`).
//!
//! Requires `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY` in the environment.
//! Only US equities are served.

pub mod params;
pub mod provider;
pub mod response;
