//! Step definitions for executor recommendation scenarios.

pub mod given;
pub mod when;
pub mod world;
