//! Common utilities for the Lumen contrast checker.
//!
//! This crate provides shared infrastructure used by all Lumen components:
//! - **Warning System** - de-duplicated `tracing` warnings for unsupported input

pub mod warning;
