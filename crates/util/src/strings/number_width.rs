/// Render `value` left-padded with zeros to at least `width` digits.
///
/// Values wider than `width` are returned in full, never truncated.
///
/// # Examples
///
/// ```
/// use odata_util::strings::format_number_width;
///
/// assert_eq!(format_number_width(5, 2), "05");
/// assert_eq!(format_number_width(42, 2), "42");
/// assert_eq!(format_number_width(7, 3), "007");
/// assert_eq!(format_number_width(1234, 2), "1234");
/// ```
pub fn format_number_width(value: u64, width: usize) -> String {
    format!("{value:0>width$}")
}
