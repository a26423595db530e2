//! Helper functions
//!
//! Pure utilities shared across the crate: publication-date parsing,
//! comparison and display, and reading-time estimation.

pub mod date;
pub mod reading;

pub use date::*;
pub use reading::*;
