pub mod aggregator;
pub mod cache;
pub mod error;
pub mod market_share;
pub mod period_order;
pub mod service;
pub mod settings;
pub mod timestamp;
pub mod top_n;
