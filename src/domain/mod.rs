// Domain layer - Exchange-rate models and errors
pub mod error;
pub mod range;
pub mod rates;
pub mod summary;
