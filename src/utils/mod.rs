//! Utility functions.

pub mod dates;
