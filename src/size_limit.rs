use crate::constants;
use std::collections::HashMap;

/// Size limits for a buffered body and for the fields inside it.
///
/// Nothing is limited by default.
#[derive(Debug, Clone)]
pub struct SizeLimit {
    pub(crate) whole_stream: u64,
    pub(crate) per_field: u64,
    pub(crate) field_map: HashMap<String, u64>,
}

impl SizeLimit {
    /// Creates a default size limit which is [`u64::MAX`] for the whole stream
    /// and for each field.
    pub fn new() -> SizeLimit {
        SizeLimit::default()
    }

    /// Sets size limit for the whole stream.
    pub fn whole_stream(mut self, limit: u64) -> SizeLimit {
        self.whole_stream = limit;
        self
    }

    /// Sets size limit for each field.
    pub fn per_field(mut self, limit: u64) -> SizeLimit {
        self.per_field = limit;
        self
    }

    /// Sets size limit for a specific field, it overrides the `per_field` value for this field.
    pub fn for_field<N: Into<String>>(mut self, field_name: N, limit: u64) -> SizeLimit {
        self.field_map.insert(field_name.into(), limit);
        self
    }

    pub(crate) fn extract_size_limit_for(&self, field: Option<&str>) -> u64 {
        field
            .and_then(|field| self.field_map.get(field))
            .copied()
            .unwrap_or(self.per_field)
    }

    pub(crate) fn check_field(&self, field: Option<&str>, size: u64) -> crate::Result<()> {
        let limit = self.extract_size_limit_for(field);

        if size > limit {
            return Err(crate::Error::FieldSizeExceeded {
                limit,
                field_name: field.map(|name| name.to_owned()),
            });
        }

        Ok(())
    }
}

impl Default for SizeLimit {
    fn default() -> Self {
        SizeLimit {
            whole_stream: constants::DEFAULT_WHOLE_STREAM_SIZE_LIMIT,
            per_field: constants::DEFAULT_PER_FIELD_SIZE_LIMIT,
            field_map: HashMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_size_limit_for() {
        let limit = SizeLimit::new().per_field(30).for_field("upfile", 10);

        assert_eq!(limit.extract_size_limit_for(Some("upfile")), 10);
        assert_eq!(limit.extract_size_limit_for(Some("other")), 30);
        assert_eq!(limit.extract_size_limit_for(None), 30);
        assert_eq!(SizeLimit::default().extract_size_limit_for(Some("upfile")), u64::MAX);
    }

    #[test]
    fn test_check_field() {
        let limit = SizeLimit::new().for_field("upfile", 5);

        assert!(limit.check_field(Some("upfile"), 5).is_ok());
        assert_eq!(
            limit.check_field(Some("upfile"), 6),
            Err(crate::Error::FieldSizeExceeded {
                limit: 5,
                field_name: Some("upfile".to_owned()),
            })
        );
    }
}
