//! String utilities.
//!
//! Fixed-width rendering of non-negative integers.

mod number_width;

pub use number_width::format_number_width;
