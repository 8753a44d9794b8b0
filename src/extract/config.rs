//! Tag extraction configuration.

use crate::error::{Error, Result};
use crate::table::OVERFLOW_COLUMN;

/// Configuration for [`TagExtractor`](super::TagExtractor).
///
/// # Examples
///
/// ```
/// use u_tagclass::extract::ExtractConfig;
///
/// let config = ExtractConfig::default().with_min_fill_rate(0.05);
/// assert!(config.validate().is_ok());
/// assert!(ExtractConfig::default().with_min_fill_rate(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// Minimum fraction of records with a value for a tag to be kept (0.0–1.0).
    ///
    /// A tag with no values at all is always dropped.
    pub min_fill_rate: f64,

    /// Name of the column holding packed tag blobs.
    pub overflow_column: String,

    /// Whether to scan blobs in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_fill_rate: 0.0,
            overflow_column: OVERFLOW_COLUMN.to_string(),
            parallel: true,
        }
    }
}

impl ExtractConfig {
    /// Sets the minimum fill rate.
    pub fn with_min_fill_rate(mut self, rate: f64) -> Self {
        self.min_fill_rate = rate;
        self
    }

    /// Sets the overflow column name.
    pub fn with_overflow_column(mut self, name: impl Into<String>) -> Self {
        self.overflow_column = name.into();
        self
    }

    /// Enables or disables parallel blob scanning.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_fill_rate) {
            return Err(Error::Config(format!(
                "min_fill_rate must be in [0, 1], got {}",
                self.min_fill_rate
            )));
        }
        if self.overflow_column.is_empty() {
            return Err(Error::Config("overflow_column must not be empty".into()));
        }
        Ok(())
    }
}
