use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use qlcm_diff::PreviewConfig;

/// Settings for one comparison run.
///
/// ```toml
/// [preview]
/// width = 120
/// lead_in = 40
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub preview: PreviewConfig,
}

impl CompareConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid comparison config")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Apply command-line overrides and validate the result.
    pub fn with_overrides(
        mut self,
        preview_width: Option<usize>,
        lead_in: Option<usize>,
    ) -> anyhow::Result<Self> {
        if let Some(width) = preview_width {
            self.preview.width = width;
        }
        if let Some(lead_in) = lead_in {
            self.preview.lead_in = lead_in;
        }
        self.preview.validate()?;
        Ok(self)
    }
}
