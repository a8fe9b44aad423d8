//! Utility functions
//!
//! Helpers shared by the library and the command-line host.

pub mod dtoa;

pub use dtoa::format_number;
