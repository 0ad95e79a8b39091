//! # Swap History Module
//!
//! Value types describing the substitutions made on recently scanned recipes. The
//! presentation layer decides whether and where to store them; nothing here touches disk.

use crate::config::HistoryConfig;
use crate::substitution::{format_original_short, format_swap_short};
use crate::text_processing::{normalize_whitespace, RecipeReport};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// One original-to-replacement pair shown in the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapSummary {
    pub original: String,
    pub swap: String,
    pub allergen: String,
}

/// The swaps made on one recipe page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: String,
    pub url: String,
    pub at: DateTime<Utc>,
    pub swaps: Vec<SwapSummary>,
}

impl HistoryEntry {
    /// Summarize a report; `None` when it holds no substitutions
    ///
    /// The title is whitespace-normalized and defaults to "Recipe"; at most `max_swaps`
    /// swaps are kept, in line order.
    pub fn from_report(
        title: &str,
        url: &str,
        at: DateTime<Utc>,
        report: &RecipeReport,
        max_swaps: usize,
    ) -> Option<Self> {
        let swaps: Vec<SwapSummary> = report
            .substitutions()
            .take(max_swaps)
            .map(|(parsed, substitution)| SwapSummary {
                original: format_original_short(parsed),
                swap: format_swap_short(parsed, substitution),
                allergen: substitution.allergen.clone(),
            })
            .collect();

        if swaps.is_empty() {
            return None;
        }

        let title = normalize_whitespace(title);
        Some(Self {
            title: if title.is_empty() {
                "Recipe".to_string()
            } else {
                title
            },
            url: url.to_string(),
            at,
            swaps,
        })
    }
}

/// Recent history entries, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapHistory {
    pub entries: Vec<HistoryEntry>,
    pub max_entries: usize,
}

impl SwapHistory {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: config.max_entries,
        }
    }

    /// A new history with `entry` first, truncated to `max_entries`
    pub fn record(&self, entry: HistoryEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(entry);
        entries.extend(self.entries.iter().cloned());
        entries.truncate(self.max_entries);

        debug!("History now holds {} entries", entries.len());
        Self {
            entries,
            max_entries: self.max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SwapHistory {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}
