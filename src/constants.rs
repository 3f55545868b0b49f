use lazy_static::lazy_static;
use regex::bytes::Regex;

pub(crate) const DEFAULT_WHOLE_STREAM_SIZE_LIMIT: u64 = std::u64::MAX;
pub(crate) const DEFAULT_PER_FIELD_SIZE_LIMIT: u64 = std::u64::MAX;

pub(crate) const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

pub(crate) const MAX_HEADERS: usize = 32;
pub(crate) const BOUNDARY_EXT: &str = "--";
pub(crate) const CRLF: &str = "\r\n";
pub(crate) const CRLF_CRLF: &str = "\r\n\r\n";

lazy_static! {
    pub(crate) static ref CONTENT_DISPOSITION_FIELD_NAME_RE: Regex = Regex::new(r#"(?-u)\bname="([^"]+)""#).unwrap();
    pub(crate) static ref CONTENT_DISPOSITION_FILE_NAME_RE: Regex = Regex::new(r#"(?-u)filename="([^"]+)""#).unwrap();
    pub(crate) static ref CONTENT_DISPOSITION_LINE_RE: Regex =
        Regex::new(r"(?im-u)^content-disposition:[ \t]*([^\r\n]+)").unwrap();
    pub(crate) static ref CONTENT_TYPE_LINE_RE: Regex = Regex::new(r"(?im-u)^content-type:[ \t]*([^\r\n]*)").unwrap();
}
