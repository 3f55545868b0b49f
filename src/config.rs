//! Settings for the upload service.

use crate::SizeLimit;

/// Field name the upload form uses for the file input.
pub const DEFAULT_FIELD_NAME: &str = "upfile";

/// Configuration shared by every request the service handles.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Form field whose file is inspected.
    pub field_name: String,

    /// Limits applied while buffering the body and measuring the file.
    pub size_limit: SizeLimit,
}

impl ServiceConfig {
    pub fn new() -> ServiceConfig {
        ServiceConfig::default()
    }

    pub fn field_name<N: Into<String>>(mut self, field_name: N) -> ServiceConfig {
        self.field_name = field_name.into();
        self
    }

    /// Limits the whole request body, in bytes.
    pub fn max_body_size(mut self, limit: u64) -> ServiceConfig {
        self.size_limit = self.size_limit.whole_stream(limit);
        self
    }

    /// Limits the inspected file, in bytes. Applies to the field name set so
    /// far, so call it after [`field_name()`](ServiceConfig::field_name).
    pub fn max_file_size(mut self, limit: u64) -> ServiceConfig {
        let field_name = self.field_name.clone();
        self.size_limit = self.size_limit.for_field(field_name, limit);
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            field_name: DEFAULT_FIELD_NAME.to_owned(),
            size_limit: SizeLimit::default(),
        }
    }
}
