//! Govdash Library
//!
//! Client-side aggregation and live-refresh core of the governance dashboard.

pub mod aggregator;
pub mod analytics;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod navigation;
pub mod scheduler;
pub mod selection;

#[cfg(test)]
mod testing;

// Re-export the coordinator for convenience
pub use coordinator::DashboardCoordinator;
