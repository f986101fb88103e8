//! Offering rate table

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::VersionConfig;
use crate::error::{DrawError, DrawOutcome};
use crate::frequency::{compute_frequencies, total_weight};
use crate::rarity::RarityTag;

/// One row of a rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub rarity: RarityTag,
    pub count: u32,
    /// Per-item weight
    pub probability: f64,
    pub total_frequency: f64,
    /// Chance of drawing this category (0..=1)
    pub share: f64,
    /// Chance of drawing one specific item of this category
    pub per_item_share: f64,
}

/// Draw chances for every category of a version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub version: String,
    pub total_weight: f64,
    pub entries: Vec<RateEntry>,
}

impl RateTable {
    /// Compute the table for `config`
    pub fn for_version(version: &str, config: &VersionConfig) -> DrawOutcome<Self> {
        let frequencies = compute_frequencies(&config.categories);
        let total = total_weight(&frequencies);

        if frequencies.is_empty() || !(total > 0.0) {
            return Err(DrawError::EmptyCategorySet);
        }

        let entries = frequencies
            .iter()
            .map(|f| RateEntry {
                rarity: f.category.name,
                count: f.category.count,
                probability: f.category.probability,
                total_frequency: f.total_frequency,
                share: f.total_frequency / total,
                per_item_share: f.category.probability / total,
            })
            .collect();

        Ok(Self {
            version: version.to_string(),
            total_weight: total,
            entries,
        })
    }

    /// Row for `rarity`
    pub fn get(&self, rarity: RarityTag) -> Option<&RateEntry> {
        self.entries.iter().find(|e| e.rarity == rarity)
    }

    /// Share of `rarity`, 0 if not configured
    pub fn share(&self, rarity: RarityTag) -> f64 {
        self.get(rarity).map(|e| e.share).unwrap_or(0.0)
    }
}

impl fmt::Display for RateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - Total weight: {}", self.version, self.total_weight)?;
        writeln!(
            f,
            "  {:<18} {:>6} {:>10} {:>9} {:>10}",
            "rarity", "items", "weight", "rate", "per item"
        )?;
        for entry in &self.entries {
            writeln!(
                f,
                "  {:<18} {:>6} {:>10.3} {:>8.3}% {:>9.4}%",
                entry.rarity.tag(),
                entry.count,
                entry.total_frequency,
                entry.share * 100.0,
                entry.per_item_share * 100.0
            )?;
        }
        Ok(())
    }
}
