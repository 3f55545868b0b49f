use crate::content_disposition::ContentDisposition;
use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};
use http::header::{self, HeaderMap};
#[cfg(feature = "json")]
use serde::de::DeserializeOwned;

/// A single part of a buffered `multipart/form-data` body.
///
/// Fields are produced by [`Multipart::fields()`](crate::Multipart::fields);
/// the content is a cheap slice of the buffered body.
#[derive(Debug, Clone)]
pub struct Field {
    headers: HeaderMap,
    content: Bytes,
    meta: FieldMeta,
}

#[derive(Debug, Clone)]
struct FieldMeta {
    name: Option<String>,
    file_name: Option<String>,
    content_type: Option<mime::Mime>,
    idx: usize,
}

impl Field {
    pub(crate) fn new(headers: HeaderMap, content: Bytes, idx: usize) -> Self {
        let content_disposition = ContentDisposition::parse(&headers);
        let content_type = Self::parse_content_type(&headers);

        Field {
            headers,
            content,
            meta: FieldMeta {
                name: content_disposition.field_name,
                file_name: content_disposition.file_name,
                content_type,
                idx,
            },
        }
    }

    fn parse_content_type(headers: &HeaderMap) -> Option<mime::Mime> {
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<mime::Mime>().ok())
    }

    /// The field name found in the
    /// [`Content-Disposition`](https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Content-Disposition) header.
    pub fn name(&self) -> Option<&str> {
        self.meta.name.as_deref()
    }

    /// The file name found in the
    /// [`Content-Disposition`](https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Content-Disposition) header.
    pub fn file_name(&self) -> Option<&str> {
        self.meta.file_name.as_deref()
    }

    /// Get the content type of the field.
    pub fn content_type(&self) -> Option<&mime::Mime> {
        self.meta.content_type.as_ref()
    }

    /// Get a map of headers as [`HeaderMap`].
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The index of this field in order of appearance in the body.
    pub fn index(&self) -> usize {
        self.meta.idx
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get the full field data.
    pub fn bytes(&self) -> Bytes {
        self.content.clone()
    }

    /// Try to deserialize the field data as JSON.
    ///
    /// # Optional
    ///
    /// This requires the optional `json` feature to be enabled.
    #[cfg(feature = "json")]
    pub fn json<T: DeserializeOwned>(&self) -> crate::Result<T> {
        serde_json::from_slice(&self.content).map_err(crate::Error::DecodeJson)
    }

    /// Get the full field data as text, decoded with the `charset` of the
    /// field's content type, or UTF-8.
    pub fn text(&self) -> String {
        self.text_with_charset("utf-8")
    }

    /// Get the full field data as text given a specific encoding.
    ///
    /// The `charset` parameter of the field's content type takes precedence
    /// over `default_encoding`. Unknown labels fall back to UTF-8.
    pub fn text_with_charset(&self, default_encoding: &str) -> String {
        let encoding_name = self
            .content_type()
            .and_then(|mime| mime.get_param(mime::CHARSET))
            .map(|charset| charset.as_str())
            .unwrap_or(default_encoding);

        let encoding = Encoding::for_label(encoding_name.as_bytes()).unwrap_or(UTF_8);

        let (text, _, _) = encoding.decode(&self.content);

        text.into_owned()
    }
}
