//! Date and duration values.
//!
//! Covers the legacy `/Date(<ms>[±<mins>])/` marker form, ISO-8601 date/time
//! strings, and the canonical duration text written on output.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use odata_util::format_number_width;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Largest magnitude, in milliseconds from the epoch, of a valid timestamp.
const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// EDM type a recognized date value is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    DateTime,
    DateTimeOffset,
}

impl DateKind {
    pub fn edm_type(&self) -> &'static str {
        match self {
            DateKind::DateTime => "Edm.DateTime",
            DateKind::DateTimeOffset => "Edm.DateTimeOffset",
        }
    }
}

/// A point in time, optionally tagged with its EDM type and the timezone
/// offset (in minutes east of UTC) it was written with.
#[derive(Debug, Clone, PartialEq)]
pub struct DateValue {
    pub instant: DateTime<Utc>,
    pub kind: Option<DateKind>,
    pub offset_minutes: Option<i32>,
}

impl DateValue {
    pub fn utc(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            kind: None,
            offset_minutes: None,
        }
    }

    /// The retained offset in `±hh:mm` form.
    pub fn offset(&self) -> Option<String> {
        self.offset_minutes.map(minutes_to_offset)
    }

    /// ISO-8601 text with millisecond precision. Values carrying an offset are
    /// rendered in local time with that offset; others in UTC with `Z`.
    pub fn to_iso_string(&self) -> String {
        let local = self
            .offset_minutes
            .and_then(|mins| FixedOffset::east_opt(mins.checked_mul(60)?));
        match local {
            Some(offset) => self
                .instant
                .with_timezone(&offset)
                .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
                .to_string(),
            None => self.instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

/// Format signed minutes as `±hh:mm`; zero renders as `+00:00`.
///
/// # Example
///
/// ```
/// use odata_json::temporal::minutes_to_offset;
///
/// assert_eq!(minutes_to_offset(-60), "-01:00");
/// assert_eq!(minutes_to_offset(330), "+05:30");
/// ```
pub fn minutes_to_offset(minutes: i32) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let minutes = u64::from(minutes.unsigned_abs());
    format!(
        "{sign}{}:{}",
        format_number_width(minutes / 60, 2),
        format_number_width(minutes % 60, 2)
    )
}

fn json_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^/Date\((-?\d+)([+-])?(\d+)?\)/$").expect("valid json date pattern")
    })
}

/// Parse the legacy `/Date(<ms>[±<mins>])/` marker form.
///
/// With an offset, the result is tagged `Edm.DateTimeOffset` and its instant
/// is shifted back by the offset to recover UTC. Returns `None` when the text
/// does not match, a sign has no minutes, the offset is a day or more, or the
/// timestamp is out of range.
///
/// # Example
///
/// ```
/// use odata_json::temporal::parse_json_date_string;
///
/// let date = parse_json_date_string("/Date(0-60)/").unwrap();
/// assert_eq!(date.instant.timestamp(), 3600);
/// assert_eq!(date.offset().as_deref(), Some("-01:00"));
/// assert!(parse_json_date_string("2020-01-01").is_none());
/// ```
pub fn parse_json_date_string(text: &str) -> Option<DateValue> {
    let caps = json_date_re().captures(text)?;
    let millis: i64 = caps.get(1)?.as_str().parse().ok()?;
    let mut value = DateValue::utc(timestamp(millis)?);
    if let Some(sign) = caps.get(2) {
        let mut mins: i32 = caps.get(3)?.as_str().parse().ok()?;
        if sign.as_str() == "-" {
            mins = -mins;
        }
        // Offsets must fit a fixed offset of less than a day.
        FixedOffset::east_opt(mins.checked_mul(60)?)?;
        let shifted = millis.checked_sub(i64::from(mins) * 60_000)?;
        value.instant = timestamp(shifted)?;
        value.kind = Some(DateKind::DateTimeOffset);
        value.offset_minutes = Some(mins);
    }
    Some(value)
}

fn timestamp(millis: i64) -> Option<DateTime<Utc>> {
    if millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis)
}

/// Parse an ISO-8601 date/time such as `2013-05-01T10:20:30.5+02:00`.
///
/// A missing offset reads as UTC. The result is tagged with `kind` and keeps
/// the written offset.
pub fn parse_date_time_offset(text: &str, kind: DateKind) -> Option<DateValue> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(DateValue {
            instant: parsed.with_timezone(&Utc),
            kind: Some(kind),
            offset_minutes: Some(parsed.offset().local_minus_utc() / 60),
        });
    }
    let offset_re = offset_suffix_re();
    let (body, offset_minutes) = match offset_re.captures(text) {
        Some(caps) => {
            let body = &text[..caps.get(0)?.start()];
            let mins = match caps.get(1).map(|m| m.as_str()) {
                Some("Z") | None => 0,
                Some(_) => {
                    let hours: i32 = caps.get(3)?.as_str().parse().ok()?;
                    let mins: i32 = caps.get(4)?.as_str().parse().ok()?;
                    let total = hours * 60 + mins;
                    if caps.get(2)?.as_str() == "-" {
                        -total
                    } else {
                        total
                    }
                }
            };
            (body, Some(mins))
        }
        None => (text, None),
    };
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(body, fmt).ok())?;
    let offset = FixedOffset::east_opt(offset_minutes.unwrap_or(0) * 60)?;
    let instant = offset.from_local_datetime(&naive).single()?.with_timezone(&Utc);
    Some(DateValue {
        instant,
        kind: Some(kind),
        offset_minutes,
    })
}

fn offset_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(Z|([+-])(\d{2}):(\d{2}))$").expect("valid offset pattern")
    })
}

/// A signed duration with millisecond precision plus sub-millisecond
/// nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationValue {
    pub millis: i64,
    /// Sub-millisecond remainder, `0..1_000_000`.
    pub nanos: u32,
}

impl DurationValue {
    pub fn from_millis(millis: i64) -> Self {
        Self { millis, nanos: 0 }
    }
}

impl fmt::Display for DurationValue {
    /// Canonical text: `[-]P<dd>DT<hh>H<mm>M<ss>.<fff>[<ns>]S`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.millis < 0 { "-" } else { "" };
        let mut ms = self.millis.unsigned_abs();
        let days = ms / 86_400_000;
        ms -= days * 86_400_000;
        let hours = ms / 3_600_000;
        ms -= hours * 3_600_000;
        let minutes = ms / 60_000;
        ms -= minutes * 60_000;
        let seconds = ms / 1000;
        ms -= seconds * 1000;
        let nanos = if self.nanos == 0 {
            String::new()
        } else {
            format_number_width(u64::from(self.nanos), 6)
                .trim_end_matches('0')
                .to_string()
        };
        write!(
            f,
            "{sign}P{}DT{}H{}M{}.{}{nanos}S",
            format_number_width(days, 2),
            format_number_width(hours, 2),
            format_number_width(minutes, 2),
            format_number_width(seconds, 2),
            format_number_width(ms, 3),
        )
    }
}
