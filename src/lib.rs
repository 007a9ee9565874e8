//! Oceanwave library - Procedural ocean surface mesh synthesis

pub mod cpu;
pub mod error;
pub mod export;
pub mod host;
pub mod noise;
pub mod ocean;
pub mod params;
