//! Core engine types and utilities shared by the galaxy simulation.
//!
//! This crate provides the foundational pieces used across all systems:
//! - Time management and fixed-tick accumulation
//! - Key-value persistence backends

pub mod storage;
pub mod time;

pub use storage::*;
pub use time::*;

// Re-export commonly used types
pub use glam::{Vec2, Vec3};
