//! Input limits

use crate::error::{Result, RfiError};

/// Limits applied before a transform runs
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum size of the source text in bytes (default: 64 MiB)
    pub max_input_bytes: usize,
    /// Maximum number of injected fields per plan (default: 64)
    pub max_injected_fields: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: 64 * 1024 * 1024,
            max_injected_fields: 64,
        }
    }
}

impl Limits {
    /// Reject source text larger than `max_input_bytes`
    pub fn check_input_len(&self, len: usize) -> Result<()> {
        if len > self.max_input_bytes {
            return Err(RfiError::LimitExceeded(format!(
                "input is {} bytes (max: {} bytes)",
                len, self.max_input_bytes
            )));
        }
        Ok(())
    }

    /// Reject plans that inject more than `max_injected_fields` fields
    pub fn check_field_count(&self, count: usize) -> Result<()> {
        if count > self.max_injected_fields {
            return Err(RfiError::LimitExceeded(format!(
                "{} injected fields (max: {})",
                count, self.max_injected_fields
            )));
        }
        Ok(())
    }
}
