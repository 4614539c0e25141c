//! Media types with parameters, and the `odata.metadata` level they carry.

use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// A parsed `Content-Type` value such as
/// `application/json;odata.metadata=minimal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub media_type: String,
    pub properties: IndexMap<String, String>,
}

impl ContentType {
    pub fn new(media_type: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            properties: IndexMap::new(),
        }
    }

    /// `application/json` without parameters.
    pub fn json() -> Self {
        Self::new(JSON_MEDIA_TYPE)
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Split a header value on `;` into the media type and `name=value`
    /// parameters. Parameters without `=` are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use odata_json::ContentType;
    ///
    /// let ct = ContentType::parse("application/json; odata.metadata=full; charset=utf-8");
    /// assert_eq!(ct.media_type, "application/json");
    /// assert_eq!(ct.property("odata.metadata"), Some("full"));
    /// assert_eq!(ct.property("charset"), Some("utf-8"));
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split(';');
        let media_type = parts.next().unwrap_or_default().trim().to_string();
        let properties = parts
            .filter_map(|part| part.split_once('='))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect();
        Self {
            media_type,
            properties,
        }
    }

    /// Parameter lookup, case-insensitive on the name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_json(&self) -> bool {
        self.media_type.eq_ignore_ascii_case(JSON_MEDIA_TYPE)
    }

    /// The metadata level declared by `odata.metadata`.
    pub fn metadata_level(&self) -> Option<MetadataLevel> {
        MetadataLevel::from_format(self.property("odata.metadata"))
    }
}

impl FromStr for ContentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.media_type)?;
        for (name, value) in &self.properties {
            write!(f, ";{name}={value}")?;
        }
        Ok(())
    }
}

/// How much metadata a JSON payload declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum MetadataLevel {
    None = 0,
    Minimal = 1,
    Full = 2,
}

impl MetadataLevel {
    /// Interpret an `odata.metadata` value, compared case-insensitively.
    ///
    /// An absent value means [`MetadataLevel::Minimal`]; an unrecognized one
    /// gives `None`.
    pub fn from_format(format: Option<&str>) -> Option<Self> {
        let Some(format) = format else {
            return Some(MetadataLevel::Minimal);
        };
        match format.to_ascii_lowercase().as_str() {
            "none" => Some(MetadataLevel::None),
            "minimal" => Some(MetadataLevel::Minimal),
            "full" => Some(MetadataLevel::Full),
            _ => None,
        }
    }
}
