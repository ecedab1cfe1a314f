//! Small helpers used throughout the crate.

pub mod hex;
