use crate::buffer::StreamBuffer;
use crate::constants;
use crate::content_disposition::ContentDisposition;
use crate::helpers;
use crate::scanner::{BodyScanner, PartLayout};
use crate::size_limit::SizeLimit;
use crate::{Field, FieldDescriptor};
use bytes::Bytes;
use futures_util::stream::{Stream, TryStreamExt};
use memchr::memmem;

/// A fully buffered `multipart/form-data` body.
///
/// Unlike a streaming parser, the whole body is held in memory, so any part
/// can be inspected in any order and more than once.
///
/// # Examples
///
/// ```
/// use filemeta::Multipart;
///
/// let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"upfile\"; filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nhello\r\n--X-BOUNDARY--\r\n";
/// let multipart = Multipart::new(data, "X-BOUNDARY");
///
/// let descriptor = multipart.extract_field("upfile").unwrap();
/// assert_eq!(descriptor.file_name, "a.txt");
/// assert_eq!(descriptor.size, 5);
/// ```
#[derive(Debug, Clone)]
pub struct Multipart {
    body: Bytes,
    boundary: String,
    size_limit: SizeLimit,
}

impl Multipart {
    /// Construct a new `Multipart` instance with the given body and the boundary.
    pub fn new<D, B>(body: D, boundary: B) -> Multipart
    where
        D: Into<Bytes>,
        B: Into<String>,
    {
        Multipart::with_size_limit(body, boundary, SizeLimit::default())
    }

    /// Construct a new `Multipart` instance whose fields are checked against
    /// `size_limit`.
    pub fn with_size_limit<D, B>(body: D, boundary: B, size_limit: SizeLimit) -> Multipart
    where
        D: Into<Bytes>,
        B: Into<String>,
    {
        Multipart {
            body: body.into(),
            boundary: boundary.into(),
            size_limit,
        }
    }

    /// Buffers the given [`Bytes`] stream completely and constructs a
    /// `Multipart` over it.
    ///
    /// Fails with [`Error::StreamSizeExceeded`](crate::Error::StreamSizeExceeded)
    /// if the stream yields more than the `whole_stream` limit.
    pub async fn from_stream<S, O, E, B>(stream: S, boundary: B, size_limit: SizeLimit) -> crate::Result<Multipart>
    where
        S: Stream<Item = Result<O, E>> + Send,
        O: Into<Bytes>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
        B: Into<String>,
    {
        let stream = stream
            .map_ok(|b| b.into())
            .map_err(|err| crate::Error::StreamReadFailed(err.into()));

        let body = StreamBuffer::new(stream, size_limit.whole_stream).read_to_end().await?;

        Ok(Multipart::with_size_limit(body, boundary, size_limit))
    }

    /// The buffered body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The boundary value, without the leading `--`.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Reports the filename, declared content type and size of the first part
    /// named `field_name`.
    ///
    /// See [`extract_field()`](crate::extract_field) for the exact rules.
    pub fn extract_field(&self, field_name: &str) -> crate::Result<FieldDescriptor> {
        let descriptor = extract(&BodyScanner::new(&self.body, &self.boundary), field_name)?;

        self.size_limit.check_field(Some(field_name), descriptor.size)?;

        Ok(descriptor)
    }

    /// Parses every part of the body, in order of appearance.
    ///
    /// Parts are taken from the first delimiter up to the closing delimiter;
    /// anything before or after is ignored.
    pub fn fields(&self) -> crate::Result<Vec<Field>> {
        let scanner = BodyScanner::new(&self.body, &self.boundary);

        scanner
            .parts()
            .into_iter()
            .map(|part| self.field_at(&scanner, part))
            .collect()
    }

    fn field_at(&self, scanner: &BodyScanner<'_>, part: PartLayout) -> crate::Result<Field> {
        let content_start = part.content_start.ok_or(crate::Error::IncompleteHeaders)?;

        // The header range opens with the CRLF that ends the delimiter line.
        let mut header_start = part.header.start;
        if self.body[header_start..].starts_with(constants::CRLF.as_bytes()) {
            header_start += constants::CRLF.len();
        }

        let headers = helpers::parse_header_block(&self.body[header_start..content_start])?;

        let content_end = scanner
            .content_end(content_start)
            .ok_or(crate::Error::InvalidMultipartStructure("part content ends before it starts"))?;

        let field = Field::new(headers, self.body.slice(content_start..content_end), part.index);

        self.size_limit.check_field(field.name(), field.len() as u64)?;

        debug!(
            "part {}: name={:?} file_name={:?} size={}",
            field.index(),
            field.name(),
            field.file_name(),
            field.len()
        );

        Ok(field)
    }
}

/// Reports the filename, declared content type and size of the file sent in
/// the part named `field_name`.
///
/// `body` is the complete request body and `boundary` the boundary value from
/// the `Content-Type` header (see [`parse_boundary()`](crate::parse_boundary)),
/// without the leading `--`.
///
/// The `filename` and `Content-Type` attributes are read from the matched
/// part's own header block only. A part without a `Content-Type` header is
/// reported as `application/octet-stream`. The size is the number of bytes
/// between the blank line ending the header block and the line terminator
/// before the next delimiter.
///
/// # Examples
///
/// ```
/// let body = b"--XYZ\r\nContent-Disposition: form-data; name=\"upfile\"; filename=\"a.txt\"\r\n\r\nhello\r\n--XYZ--\r\n";
///
/// let descriptor = filemeta::extract_field(body, "XYZ", "upfile").unwrap();
/// assert_eq!(descriptor.file_name, "a.txt");
/// assert_eq!(descriptor.content_type, "application/octet-stream");
/// assert_eq!(descriptor.size, 5);
/// ```
pub fn extract_field(body: &[u8], boundary: &str, field_name: &str) -> crate::Result<FieldDescriptor> {
    extract(&BodyScanner::new(body, boundary), field_name)
}

fn extract(scanner: &BodyScanner<'_>, field_name: &str) -> crate::Result<FieldDescriptor> {
    let body = scanner.body();

    let (part, disposition) = match find_part(scanner, field_name) {
        Some(found) => found,
        None => return Err(field_not_found(scanner, field_name)),
    };

    let file_name = disposition.file_name.ok_or_else(|| crate::Error::FilenameNotFound {
        field_name: field_name.to_owned(),
    })?;

    let content_type = constants::CONTENT_TYPE_LINE_RE
        .captures(&body[part.header.clone()])
        .and_then(|cap| cap.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).trim().to_owned())
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| constants::DEFAULT_CONTENT_TYPE.to_owned());

    if scanner.delimiters().len() < 2 {
        return Err(crate::Error::InvalidMultipartStructure("fewer than two delimiters"));
    }

    let content_start = part.content_start.ok_or_else(|| crate::Error::ContentStartNotFound {
        field_name: field_name.to_owned(),
    })?;

    let content_end = scanner
        .content_end(content_start)
        .ok_or(crate::Error::InvalidMultipartStructure("field content ends before it starts"))?;

    let size = (content_end - content_start) as u64;

    debug!(
        "field {:?}: file_name={:?} content_type={:?} size={}",
        field_name, file_name, content_type, size
    );

    Ok(FieldDescriptor {
        name: field_name.to_owned(),
        file_name,
        content_type,
        size,
    })
}

fn find_part(scanner: &BodyScanner<'_>, field_name: &str) -> Option<(PartLayout, ContentDisposition)> {
    scanner.parts().into_iter().find_map(|part| {
        let disposition = ContentDisposition::parse_block(&scanner.body()[part.header.clone()]);

        if disposition.field_name.as_deref() == Some(field_name) {
            Some((part, disposition))
        } else {
            None
        }
    })
}

fn field_not_found(scanner: &BodyScanner<'_>, field_name: &str) -> crate::Error {
    let marker = format!("name=\"{}\"", field_name);

    // The name is in the body but not in any part we could delimit.
    if memmem::find(scanner.body(), marker.as_bytes()).is_some() && scanner.delimiters().len() < 2 {
        return crate::Error::InvalidMultipartStructure("fewer than two delimiters");
    }

    crate::Error::FieldNotFound {
        field_name: field_name.to_owned(),
    }
}
