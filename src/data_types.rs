pub mod config;
pub mod range;
pub mod series;

// Re-export everything for convenience
pub use config::*;
pub use range::*;
pub use series::*;
