//! Reports the filename, declared content type and size of a file uploaded
//! as `multipart/form-data`, without keeping the file itself.
//!
//! The core is [`extract_field()`], a pure function over a fully buffered
//! body. [`Multipart`] wraps a buffered body (optionally collected from a
//! [`Stream`](futures_util::stream::Stream) of chunks) and also exposes every
//! part as a typed [`Field`].
//!
//! # Examples
//!
//! ```
//! let content_type = "multipart/form-data; boundary=X-BOUNDARY";
//! let body = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"upfile\"; filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nhello\r\n--X-BOUNDARY--\r\n";
//!
//! let boundary = filemeta::parse_boundary(content_type).unwrap();
//! let descriptor = filemeta::extract_field(body.as_bytes(), &boundary, "upfile").unwrap();
//!
//! assert_eq!(descriptor.file_name, "a.txt");
//! assert_eq!(descriptor.content_type, "text/plain");
//! assert_eq!(descriptor.size, 5);
//! ```
//!
//! # Features
//!
//! - `json`: serialize [`FieldDescriptor`] and decode fields with [`Field::json()`].
//! - `log`: emit diagnostics through the [`log`](https://docs.rs/log) facade.
//! - `server` (default): the `/api/fileanalyse` HTTP service in [`service`]
//!   and the `filemeta` binary.

pub use bytes;
pub use descriptor::FieldDescriptor;
pub use error::Error;
pub use field::Field;
pub use multipart::{extract_field, Multipart};
pub use size_limit::SizeLimit;

#[macro_use]
mod macros;

mod buffer;
mod constants;
mod content_disposition;
mod descriptor;
mod error;
mod field;
mod helpers;
mod multipart;
mod scanner;
mod size_limit;

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod server;
#[cfg(feature = "server")]
pub mod service;

/// A Result type often returned from methods that can have `filemeta` errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Parses the `Content-Type` header to extract the boundary value.
pub fn parse_boundary<T: AsRef<str>>(content_type: T) -> crate::Result<String> {
    let m = content_type
        .as_ref()
        .parse::<mime::Mime>()
        .map_err(crate::Error::DecodeContentType)?;

    if !(m.type_() == mime::MULTIPART_FORM_DATA.type_() && m.subtype() == mime::MULTIPART_FORM_DATA.subtype()) {
        return Err(crate::Error::NoMultipart);
    }

    m.get_param(mime::BOUNDARY)
        .map(|name| name.as_str().to_owned())
        .filter(|boundary| !boundary.is_empty())
        .ok_or(crate::Error::NoBoundary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boundary() {
        let content_type = "multipart/form-data; boundary=ABCDEFG";
        assert_eq!(parse_boundary(content_type), Ok("ABCDEFG".to_owned()));

        let content_type = "multipart/form-data; boundary=------ABCDEFG";
        assert_eq!(parse_boundary(content_type), Ok("------ABCDEFG".to_owned()));

        let content_type = "boundary=------ABCDEFG";
        assert!(parse_boundary(content_type).is_err());

        let content_type = "text/plain";
        assert_eq!(parse_boundary(content_type), Err(Error::NoMultipart));

        let content_type = "text/plain; boundary=------ABCDEFG";
        assert_eq!(parse_boundary(content_type), Err(Error::NoMultipart));

        let content_type = "multipart/form-data";
        assert_eq!(parse_boundary(content_type), Err(Error::NoBoundary));
    }
}
