//! OData protocol version strings (`"4.0"`, `"4.01"`).

/// Parse a `major.minor` version string into a comparable pair.
///
/// A missing minor part reads as `0`. Returns `None` when either part is not
/// a non-negative integer.
///
/// # Examples
///
/// ```
/// use odata_util::parse_version;
///
/// assert_eq!(parse_version("4.0"), Some((4, 0)));
/// assert_eq!(parse_version("4.01"), Some((4, 1)));
/// assert_eq!(parse_version("3"), Some((3, 0)));
/// assert_eq!(parse_version("four"), None);
/// ```
pub fn parse_version(version: &str) -> Option<(u32, u32)> {
    let version = version.trim();
    let (major, minor) = match version.split_once('.') {
        Some((major, minor)) => (major, minor),
        None => (version, "0"),
    };
    Some((major.parse().ok()?, minor.parse().ok()?))
}

/// Return the greater of two version strings.
///
/// Unparseable versions compare below every parseable one; on a tie the right
/// operand is returned.
///
/// # Examples
///
/// ```
/// use odata_util::max_version;
///
/// assert_eq!(max_version("3.0", "4.0"), "4.0");
/// assert_eq!(max_version("4.01", "4.0"), "4.01");
/// assert_eq!(max_version("bogus", "4.0"), "4.0");
/// ```
pub fn max_version<'a>(left: &'a str, right: &'a str) -> &'a str {
    match (parse_version(left), parse_version(right)) {
        (Some(l), Some(r)) if l > r => left,
        (Some(_), None) => left,
        _ => right,
    }
}
