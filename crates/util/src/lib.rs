//! odata-util - low-level helpers for the OData JSON codec.
//!
//! Numeric-width formatting used by the date and duration renderers, and
//! protocol version comparison used by the serializer.

pub mod strings;
pub mod version;

pub use strings::format_number_width;
pub use version::{max_version, parse_version};
