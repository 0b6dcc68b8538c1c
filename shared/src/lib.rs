//! Shared types for the governance dashboard
//!
//! This crate contains the types exchanged with the governance controller:
//! - REST response schemas for every endpoint
//! - The merged dashboard view model

pub mod messages;
pub mod view;

pub use messages::*;
pub use view::*;
