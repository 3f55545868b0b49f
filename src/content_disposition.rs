use crate::constants;
use http::header::{self, HeaderMap};

pub(crate) struct ContentDisposition {
    pub(crate) field_name: Option<String>,
    pub(crate) file_name: Option<String>,
}

impl ContentDisposition {
    pub fn parse(headers: &HeaderMap) -> ContentDisposition {
        headers
            .get(header::CONTENT_DISPOSITION)
            .map(|val| ContentDisposition::parse_raw(val.as_bytes()))
            .unwrap_or(ContentDisposition {
                field_name: None,
                file_name: None,
            })
    }

    /// Reads `name` and `filename` from the `Content-Disposition` line of a raw
    /// header block. Parameters on other headers are ignored.
    pub fn parse_block(block: &[u8]) -> ContentDisposition {
        constants::CONTENT_DISPOSITION_LINE_RE
            .captures(block)
            .and_then(|cap| cap.get(1))
            .map(|m| ContentDisposition::parse_raw(m.as_bytes()))
            .unwrap_or(ContentDisposition {
                field_name: None,
                file_name: None,
            })
    }

    /// Reads `name` and `filename` from a raw `Content-Disposition` value.
    pub fn parse_raw(raw: &[u8]) -> ContentDisposition {
        let field_name = constants::CONTENT_DISPOSITION_FIELD_NAME_RE
            .captures(raw)
            .and_then(|cap| cap.get(1))
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned());

        let file_name = constants::CONTENT_DISPOSITION_FILE_NAME_RE
            .captures(raw)
            .and_then(|cap| cap.get(1))
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned());

        ContentDisposition { field_name, file_name }
    }
}
