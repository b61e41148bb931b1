//! Utility functions
//!
//! Provides input validation and sanitization.

pub mod validation;

pub use validation::sanitize_display_name;
