//! Configuration and constants
//!
//! Fixed names and defaults shared across the crate.

pub mod defaults;
