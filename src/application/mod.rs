// Application layer - Rate pipeline and use cases
pub mod decoder;
pub mod exchange_rate_service;
pub mod monthly_aggregator;
pub mod pipeline;
pub mod range_filter;
pub mod rate_source;
