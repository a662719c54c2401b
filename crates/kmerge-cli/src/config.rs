use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// Settings for the demo driver, loadable from TOML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Sample lists merged by `kmerge demo`. Each must be sorted ascending.
    pub lists: Vec<Vec<i64>>,
    /// Print node identities next to values.
    pub show_identities: bool,
    /// Colorize headings.
    pub color: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            lists: vec![vec![1, 4, 5], vec![1, 3, 4], vec![2, 6]],
            show_identities: true,
            color: true,
        }
    }
}

impl DemoConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure_sorted(&self.lists)
    }
}

/// Fail unless every list is non-decreasing.
pub fn ensure_sorted(lists: &[Vec<i64>]) -> anyhow::Result<()> {
    for (i, list) in lists.iter().enumerate() {
        if let Some(pos) = list.windows(2).position(|w| w[0] > w[1]) {
            bail!(
                "list {} is not sorted: {} comes before {}",
                i + 1,
                list[pos],
                list[pos + 1]
            );
        }
    }
    Ok(())
}
