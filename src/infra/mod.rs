//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem access and external processes.
//! This module is the only place where side effects occur.

pub mod filesystem;
pub mod process;
