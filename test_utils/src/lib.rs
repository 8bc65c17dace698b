//! Utility helpers for tests.
//!
//! Path and graph fixtures live in [`paths`]; [`driving`] runs a state
//! machine against a headless motor for a number of ticks.

pub mod driving;
pub mod paths;

pub use driving::{drive, forward_input, SilentQuery};
pub use paths::{graph_of, rail_along_z, ring, straight_rail};
