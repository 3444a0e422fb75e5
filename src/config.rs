// Scanner configuration, loaded from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::contact_detector::ContactKind;

/// Default toast display time
pub const DEFAULT_NOTICE_DURATION_MS: u64 = 5000;

/// Which rules run and how warnings read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Kinds to detect; rules for other kinds are not compiled
    pub enabled_kinds: Vec<ContactKind>,
    /// Whether keyword-prefixed rules run alongside the direct rules
    pub contextual_rules: bool,
    pub notice: NoticeConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            enabled_kinds: ContactKind::ALL.to_vec(),
            contextual_rules: true,
            notice: NoticeConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse a TOML document; missing fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScanConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn is_enabled(&self, kind: ContactKind) -> bool {
        self.enabled_kinds.contains(&kind)
    }

    fn validate(&self) -> Result<()> {
        if self.enabled_kinds.is_empty() {
            anyhow::bail!("enabled_kinds must name at least one contact kind");
        }
        if self.notice.duration_ms == 0 {
            anyhow::bail!("notice.duration_ms must be greater than zero");
        }
        for key in self.notice.messages.keys() {
            key.parse::<ContactKind>()
                .with_context(|| format!("notice.messages has an unknown key '{key}'"))?;
        }
        Ok(())
    }
}

/// Overrides for the warning toast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoticeConfig {
    pub title: Option<String>,
    pub duration_ms: u64,
    pub generic_message: Option<String>,
    /// Per-kind message overrides, keyed by kind name (`email`, `phone`, ...)
    pub messages: BTreeMap<String, String>,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            title: None,
            duration_ms: DEFAULT_NOTICE_DURATION_MS,
            generic_message: None,
            messages: BTreeMap::new(),
        }
    }
}
