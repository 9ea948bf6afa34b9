//! Adapter implementations for the tracker repository port.

pub mod memory;
pub mod postgres;
