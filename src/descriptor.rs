#[cfg(feature = "json")]
use serde::Serialize;

/// Metadata of one uploaded file, as reported by
/// [`extract_field()`](crate::extract_field).
///
/// With the `json` feature the descriptor serializes to the shape the upload
/// endpoint answers with:
///
/// ```json
/// { "name": "a.txt", "type": "text/plain", "size": 5 }
/// ```
///
/// The form field name is kept for callers but not serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct FieldDescriptor {
    #[cfg_attr(feature = "json", serde(skip))]
    pub name: String,
    #[cfg_attr(feature = "json", serde(rename = "name"))]
    pub file_name: String,
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub content_type: String,
    pub size: u64,
}
