//! Gacha version configuration and registry

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rarity::RarityTag;

/// Default asset extension for item images
pub const DEFAULT_EXTENSION: &str = "png";

/// One rarity category inside a version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityCategoryConfig {
    /// Rarity tier
    pub name: RarityTag,
    /// Weight of a single item in this category
    pub probability: f64,
    /// Number of items in the category (ids 1..=count)
    pub count: u32,
    /// Id namespace used in asset paths (e.g. "ssr")
    pub prefix: String,
    /// Optional item titles, index 0 = item id 1
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<String>,
}

impl RarityCategoryConfig {
    pub fn new(name: RarityTag, probability: f64, count: u32, prefix: impl Into<String>) -> Self {
        Self {
            name,
            probability,
            count,
            prefix: prefix.into(),
            titles: Vec::new(),
        }
    }

    /// Attach item titles
    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.titles = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Title of item `id` (1-based), if configured
    pub fn title_for(&self, id: u32) -> Option<&str> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.titles.get(index).map(String::as_str)
    }
}

/// Configuration of a single gacha version (pack)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionConfig {
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Asset file extension
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Categories in draw order
    pub categories: Vec<RarityCategoryConfig>,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl VersionConfig {
    pub fn new(categories: Vec<RarityCategoryConfig>) -> Self {
        Self {
            label: None,
            extension: default_extension(),
            categories,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Total items across categories
    pub fn total_items(&self) -> u64 {
        self.categories.iter().map(|c| u64::from(c.count)).sum()
    }

    /// Configured rarity tags, in draw order
    pub fn rarities(&self) -> Vec<RarityTag> {
        self.categories.iter().map(|c| c.name).collect()
    }
}

/// Validation limits applied when loading configs
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    pub max_versions: usize,
    pub max_categories: usize,
    pub max_items_per_category: u32,
    pub max_prefix_length: usize,
    pub max_extension_length: usize,
    pub max_version_length: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_versions: 256,
            max_categories: RarityTag::ALL.len(),
            max_items_per_category: 10_000,
            max_prefix_length: 32,
            max_extension_length: 8,
            max_version_length: 64,
        }
    }
}

/// Registry of gacha versions
///
/// Read-only from the engine's point of view. Built in code with
/// [`GachaRegistry::insert`] or loaded from a JSON/YAML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GachaRegistry {
    #[serde(default)]
    versions: BTreeMap<String, VersionConfig>,
}

impl GachaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a version. Does not validate.
    pub fn insert(&mut self, version: impl Into<String>, config: VersionConfig) {
        self.versions.insert(version.into(), config);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_version(mut self, version: impl Into<String>, config: VersionConfig) -> Self {
        self.insert(version, config);
        self
    }

    pub fn get(&self, version: &str) -> Option<&VersionConfig> {
        self.versions.get(version)
    }

    pub fn contains(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    /// Version names in sorted order
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VersionConfig)> {
        self.versions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // LOADING
    // ═══════════════════════════════════════════════════════════════════════════

    /// Parse and validate a JSON registry
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let registry: GachaRegistry = serde_json::from_str(json)?;
        registry.validate(&ConfigLimits::default())?;
        log::info!("Loaded gacha registry with {} versions", registry.len());
        Ok(registry)
    }

    /// Parse and validate a YAML registry
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let registry: GachaRegistry = serde_yml::from_str(yaml)?;
        registry.validate(&ConfigLimits::default())?;
        log::info!("Loaded gacha registry with {} versions", registry.len());
        Ok(registry)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            "yaml" | "yml" => Self::from_yaml_str(&std::fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Check every version against the draw invariants and `limits`
    pub fn validate(&self, limits: &ConfigLimits) -> Result<(), ConfigError> {
        if self.versions.len() > limits.max_versions {
            return Err(ConfigError::invalid(
                "*",
                format!(
                    "Too many versions: {} > {}",
                    self.versions.len(),
                    limits.max_versions
                ),
            ));
        }

        for (version, config) in &self.versions {
            validate_version(version, config, limits)?;
        }
        Ok(())
    }
}

fn validate_version(
    version: &str,
    config: &VersionConfig,
    limits: &ConfigLimits,
) -> Result<(), ConfigError> {
    if !is_path_segment(version, limits.max_version_length) {
        return Err(ConfigError::invalid(
            version,
            format!("Invalid version name: {:?}", version),
        ));
    }

    if !is_path_segment(&config.extension, limits.max_extension_length) {
        return Err(ConfigError::invalid(
            version,
            format!("Invalid extension: {:?}", config.extension),
        ));
    }

    if config.categories.is_empty() {
        return Err(ConfigError::invalid(version, "No categories"));
    }

    if config.categories.len() > limits.max_categories {
        return Err(ConfigError::invalid(
            version,
            format!(
                "Too many categories: {} > {}",
                config.categories.len(),
                limits.max_categories
            ),
        ));
    }

    let mut seen = HashSet::new();
    let mut total = 0.0;

    for category in &config.categories {
        let rarity = category.name;

        if !seen.insert(rarity) {
            return Err(ConfigError::invalid(
                version,
                format!("Duplicate category {}", rarity),
            ));
        }

        if category.count == 0 {
            return Err(ConfigError::invalid(
                version,
                format!("Category {} has no items", rarity),
            ));
        }

        if category.count > limits.max_items_per_category {
            return Err(ConfigError::invalid(
                version,
                format!(
                    "Category {} has too many items: {} > {}",
                    rarity, category.count, limits.max_items_per_category
                ),
            ));
        }

        if !category.probability.is_finite() || category.probability < 0.0 {
            return Err(ConfigError::invalid(
                version,
                format!(
                    "Category {} has invalid probability {}",
                    rarity, category.probability
                ),
            ));
        }

        if !is_path_segment(&category.prefix, limits.max_prefix_length) {
            return Err(ConfigError::invalid(
                version,
                format!("Category {} has invalid prefix {:?}", rarity, category.prefix),
            ));
        }

        if category.titles.len() > category.count as usize {
            return Err(ConfigError::invalid(
                version,
                format!(
                    "Category {} has {} titles for {} items",
                    rarity,
                    category.titles.len(),
                    category.count
                ),
            ));
        }

        total += category.probability * f64::from(category.count);
    }

    if !(total > 0.0) || !total.is_finite() {
        return Err(ConfigError::invalid(version, "Total weight is not positive"));
    }

    Ok(())
}

/// Non-empty, bounded, `[A-Za-z0-9_-]` only
fn is_path_segment(value: &str, max_len: usize) -> bool {
    !value.is_empty()
        && value.len() <= max_len
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version_with(categories: Vec<RarityCategoryConfig>) -> GachaRegistry {
        GachaRegistry::new().with_version("v1", VersionConfig::new(categories))
    }

    fn assert_invalid(registry: &GachaRegistry, needle: &str) {
        match registry.validate(&ConfigLimits::default()) {
            Err(ConfigError::Validation { reason, .. }) => {
                assert!(reason.contains(needle), "unexpected reason: {}", reason)
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_minimal_json() {
        let json = r#"{
            "versions": {
                "v1": {
                    "categories": [
                        { "name": "COMMON", "probability": 1.0, "count": 3, "prefix": "c" },
                        { "name": "SECRET_RARE", "probability": 0.1, "count": 1, "prefix": "sec" }
                    ]
                }
            }
        }"#;

        let registry = GachaRegistry::from_json_str(json).unwrap();
        let v1 = registry.get("v1").unwrap();
        assert_eq!(v1.extension, "png");
        assert_eq!(v1.categories.len(), 2);
        assert_eq!(v1.categories[1].name, RarityTag::SecretRare);
        assert_eq!(v1.total_items(), 4);
    }

    #[test]
    fn test_parse_yaml_with_titles() {
        let yaml = r#"
versions:
  spring:
    label: Spring concert
    extension: webp
    categories:
      - name: RARE
        probability: 2.5
        count: 2
        prefix: r
        titles: [Violin, Cello]
"#;

        let registry = GachaRegistry::from_yaml_str(yaml).unwrap();
        let spring = registry.get("spring").unwrap();
        assert_eq!(spring.label.as_deref(), Some("Spring concert"));
        assert_eq!(spring.extension, "webp");
        assert_eq!(spring.categories[0].title_for(2), Some("Cello"));
        assert_eq!(spring.categories[0].title_for(3), None);
        assert_eq!(spring.categories[0].title_for(0), None);
    }

    #[test]
    fn test_unknown_rarity_fails_to_parse() {
        let json = r#"{ "versions": { "v1": { "categories": [
            { "name": "MYTHIC", "probability": 1.0, "count": 1, "prefix": "m" }
        ] } } }"#;
        assert!(matches!(
            GachaRegistry::from_json_str(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_empty_categories() {
        assert_invalid(&version_with(vec![]), "No categories");
    }

    #[test]
    fn test_rejects_zero_count() {
        let registry = version_with(vec![RarityCategoryConfig::new(
            RarityTag::Common,
            1.0,
            0,
            "c",
        )]);
        assert_invalid(&registry, "no items");
    }

    #[test]
    fn test_rejects_zero_total_weight() {
        let registry = version_with(vec![
            RarityCategoryConfig::new(RarityTag::Common, 0.0, 4, "c"),
            RarityCategoryConfig::new(RarityTag::Rare, 0.0, 1, "r"),
        ]);
        assert_invalid(&registry, "Total weight");
    }

    #[test]
    fn test_rejects_bad_probability() {
        let registry = version_with(vec![RarityCategoryConfig::new(
            RarityTag::Common,
            f64::NAN,
            1,
            "c",
        )]);
        assert_invalid(&registry, "invalid probability");

        let registry = version_with(vec![RarityCategoryConfig::new(
            RarityTag::Common,
            -1.0,
            1,
            "c",
        )]);
        assert_invalid(&registry, "invalid probability");
    }

    #[test]
    fn test_rejects_duplicate_rarity() {
        let registry = version_with(vec![
            RarityCategoryConfig::new(RarityTag::Rare, 1.0, 1, "r"),
            RarityCategoryConfig::new(RarityTag::Rare, 1.0, 1, "r2"),
        ]);
        assert_invalid(&registry, "Duplicate");
    }

    #[test]
    fn test_rejects_bad_prefix() {
        let registry = version_with(vec![RarityCategoryConfig::new(
            RarityTag::Rare,
            1.0,
            1,
            "../r",
        )]);
        assert_invalid(&registry, "invalid prefix");
    }

    #[test]
    fn test_rejects_bad_version_name() {
        let category = || RarityCategoryConfig::new(RarityTag::Rare, 1.0, 1, "r");
        for name in ["", "../x", "a/b", "v 1"] {
            let registry =
                GachaRegistry::new().with_version(name, VersionConfig::new(vec![category()]));
            assert_invalid(&registry, "Invalid version name");
        }
    }

    #[test]
    fn test_extension_has_own_limit() {
        let registry = GachaRegistry::new().with_version(
            "v1",
            VersionConfig::new(vec![RarityCategoryConfig::new(
                RarityTag::Rare,
                1.0,
                1,
                "a_long_prefix_ok",
            )])
            .with_extension("webp"),
        );
        let limits = ConfigLimits {
            max_extension_length: 3,
            ..Default::default()
        };
        assert!(matches!(
            registry.validate(&limits),
            Err(ConfigError::Validation { reason, .. }) if reason.contains("extension")
        ));

        let limits = ConfigLimits {
            max_extension_length: 4,
            ..Default::default()
        };
        registry.validate(&limits).unwrap();
    }

    #[test]
    fn test_rejects_too_many_titles() {
        let registry = version_with(vec![
            RarityCategoryConfig::new(RarityTag::Rare, 1.0, 1, "r").with_titles(["Oboe", "Flute"]),
        ]);
        assert_invalid(&registry, "titles");
    }

    #[test]
    fn test_rejects_bad_extension() {
        let registry = GachaRegistry::new().with_version(
            "v1",
            VersionConfig::new(vec![RarityCategoryConfig::new(
                RarityTag::Rare,
                1.0,
                1,
                "r",
            )])
            .with_extension(""),
        );
        assert_invalid(&registry, "extension");
    }

    #[test]
    fn test_item_limit() {
        let registry = version_with(vec![RarityCategoryConfig::new(
            RarityTag::Common,
            1.0,
            20,
            "c",
        )]);
        let limits = ConfigLimits {
            max_items_per_category: 10,
            ..Default::default()
        };
        assert!(registry.validate(&limits).is_err());
    }

    #[test]
    fn test_insert_skips_validation() {
        let registry = version_with(vec![]);
        assert!(registry.contains("v1"));
        assert_eq!(registry.versions().collect::<Vec<_>>(), vec!["v1"]);
    }
}
