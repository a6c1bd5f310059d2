//! Browser adapters for the dora-core ports.

pub mod config;
pub mod generation;
pub mod identity;
