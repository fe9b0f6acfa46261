use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Shape of the divergence preview window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Total number of characters kept in each preview line.
    pub width: usize,
    /// Characters of context shown before the first difference.
    pub lead_in: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 95,
            lead_in: 30,
        }
    }
}

impl PreviewConfig {
    /// Create a validated configuration.
    pub fn new(width: usize, lead_in: usize) -> DiffResult<Self> {
        let config = Self { width, lead_in };
        config.validate()?;
        Ok(config)
    }

    /// Check that the window can hold the lead-in.
    pub fn validate(&self) -> DiffResult<()> {
        if self.width == 0 {
            return Err(DiffError::InvalidConfig("width must be at least 1".into()));
        }
        if self.lead_in > self.width {
            return Err(DiffError::InvalidConfig(format!(
                "lead-in {} exceeds width {}",
                self.lead_in, self.width
            )));
        }
        Ok(())
    }

    /// Positions scanned past the first difference.
    pub fn tail(&self) -> usize {
        self.width.saturating_sub(self.lead_in)
    }
}
