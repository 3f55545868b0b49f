use crate::constants;
use memchr::memmem;
use std::ops::Range;

/// Layout of one part: the byte ranges of its header block and content
/// inside the scanned body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PartLayout {
    pub(crate) index: usize,
    /// Everything between the delimiter and the blank line, the leading CRLF
    /// included. Runs to the end of the segment if no blank line exists.
    pub(crate) header: Range<usize>,
    /// First content byte, `None` if the header block is never terminated.
    pub(crate) content_start: Option<usize>,
}

/// Locates boundary delimiters in a fully buffered multipart body.
pub(crate) struct BodyScanner<'a> {
    body: &'a [u8],
    token: Vec<u8>,
    delimiters: Vec<usize>,
}

impl<'a> BodyScanner<'a> {
    pub(crate) fn new(body: &'a [u8], boundary: &str) -> Self {
        let token = format!("{}{}", constants::BOUNDARY_EXT, boundary).into_bytes();
        let delimiters = find_delimiters(body, &token);

        trace!("found {} delimiters for boundary {:?}", delimiters.len(), boundary);

        BodyScanner {
            body,
            token,
            delimiters,
        }
    }

    pub(crate) fn body(&self) -> &'a [u8] {
        self.body
    }

    pub(crate) fn delimiters(&self) -> &[usize] {
        &self.delimiters
    }

    /// Splits the body into parts. The preamble before the first delimiter and
    /// everything after the closing delimiter are skipped.
    pub(crate) fn parts(&self) -> Vec<PartLayout> {
        let mut parts = Vec::with_capacity(self.delimiters.len());

        for (idx, &pos) in self.delimiters.iter().enumerate() {
            let seg_start = pos + self.token.len();
            let seg_end = self.delimiters.get(idx + 1).copied().unwrap_or(self.body.len());

            if self.body[seg_start..].starts_with(constants::BOUNDARY_EXT.as_bytes()) {
                break;
            }

            let segment = &self.body[seg_start..seg_end];

            let part = match memmem::find(segment, constants::CRLF_CRLF.as_bytes()) {
                Some(rel_idx) => PartLayout {
                    index: parts.len(),
                    header: seg_start..seg_start + rel_idx + constants::CRLF.len(),
                    content_start: Some(seg_start + rel_idx + constants::CRLF_CRLF.len()),
                },
                None => PartLayout {
                    index: parts.len(),
                    header: seg_start..seg_end,
                    content_start: None,
                },
            };

            parts.push(part);
        }

        parts
    }

    /// End of the content starting at `content_start`: two bytes before the
    /// first delimiter strictly after it, or the end of the body.
    ///
    /// Returns `None` if that would make the content length negative.
    pub(crate) fn content_end(&self, content_start: usize) -> Option<usize> {
        match self.delimiters.iter().find(|&&pos| pos > content_start) {
            Some(&pos) => pos
                .checked_sub(constants::CRLF.len())
                .filter(|&end| end >= content_start),
            None => Some(self.body.len()),
        }
    }
}

fn find_delimiters(body: &[u8], token: &[u8]) -> Vec<usize> {
    let finder = memmem::Finder::new(token);
    let mut positions = Vec::new();
    let mut start = 0;

    while let Some(rel_idx) = finder.find(&body[start..]) {
        positions.push(start + rel_idx);
        start += rel_idx + token.len();
    }

    positions
}
