use thiserror::Error;

/// Errors raised by the codec.
///
/// Only [`CodecError::Decode`] escapes in the default lenient mode; the
/// classification and schema variants are raised in strict mode only.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid JSON payload: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("unclassified context URL segment {segment:?} at offset {offset}")]
    UnclassifiedFragment { segment: String, offset: usize },
    #[error("schema mismatch: {name} not found in model")]
    SchemaMismatch { name: String },
    #[error("key property {property:?} missing from entity")]
    MissingKeyValue { property: String },
    #[error("failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CodecError {
    pub(crate) fn unclassified(segment: &str, offset: usize) -> Self {
        CodecError::UnclassifiedFragment {
            segment: segment.to_string(),
            offset,
        }
    }

    pub(crate) fn schema_mismatch(name: impl Into<String>) -> Self {
        CodecError::SchemaMismatch { name: name.into() }
    }
}
