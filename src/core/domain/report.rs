//! Masked console report of a secret set.
//!
//! A value is masked when its key contains any marker as a literal,
//! case-sensitive substring. Nothing else is inspected.

use super::SecretSet;
use crate::core::config::ReportConfig;

/// Which values to hide and what to print instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskPolicy {
    mask: String,
    markers: Vec<String>,
}

impl MaskPolicy {
    pub fn new(mask: impl Into<String>, markers: Vec<String>) -> Self {
        Self {
            mask: mask.into(),
            markers,
        }
    }

    /// Whether values under `key` must be masked
    pub fn is_sensitive(&self, key: &str) -> bool {
        self.markers.iter().any(|m| key.contains(m.as_str()))
    }

    /// The value to print for `key`
    pub fn display<'a>(&'a self, key: &str, value: &'a str) -> &'a str {
        if self.is_sensitive(key) {
            &self.mask
        } else {
            value
        }
    }
}

impl Default for MaskPolicy {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for MaskPolicy {
    fn from(config: &ReportConfig) -> Self {
        Self::new(config.mask.clone(), config.markers.clone())
    }
}

/// Report lines in key order, values already masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    lines: Vec<(String, String)>,
}

impl Report {
    pub fn new(secrets: &SecretSet, policy: &MaskPolicy) -> Self {
        let lines = secrets
            .iter()
            .map(|(k, v)| (k.to_string(), policy.display(k, v).to_string()))
            .collect();
        Self { lines }
    }

    /// Formatted `KEY: value` lines
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.lines.iter().map(|(k, v)| format!("{}: {}", k, v))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
