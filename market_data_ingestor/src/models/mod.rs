pub mod bar;
pub mod bar_series;
pub mod market;
pub mod period;
pub mod raw_table;
pub mod request_params;
pub mod timeframe;
