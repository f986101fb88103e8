//! Built-in gacha versions

use crate::config::{GachaRegistry, RarityCategoryConfig, VersionConfig};
use crate::rarity::RarityTag;

/// Registry with every built-in version
pub fn builtin_registry() -> GachaRegistry {
    GachaRegistry::new()
        .with_version("v1", first_pressing())
        .with_version("v2", encore())
}

/// v1 — the first card set
pub fn first_pressing() -> VersionConfig {
    VersionConfig::new(vec![
        RarityCategoryConfig::new(RarityTag::Common, 6.0, 10, "c"),
        RarityCategoryConfig::new(RarityTag::Rare, 3.0, 6, "r"),
        RarityCategoryConfig::new(RarityTag::SuperRare, 1.5, 4, "sr"),
        RarityCategoryConfig::new(RarityTag::SuperSuperRare, 0.5, 3, "ssr"),
        RarityCategoryConfig::new(RarityTag::SecretRare, 0.1, 1, "sec"),
    ])
    .with_label("First Pressing")
}

/// v2 — instrument set with titled items and webp assets
pub fn encore() -> VersionConfig {
    VersionConfig::new(vec![
        RarityCategoryConfig::new(RarityTag::Common, 5.0, 8, "c"),
        RarityCategoryConfig::new(RarityTag::Uncommon, 3.0, 6, "uc"),
        RarityCategoryConfig::new(RarityTag::Rare, 2.0, 4, "r")
            .with_titles(["Violin", "Viola", "Cello", "Double Bass"]),
        RarityCategoryConfig::new(RarityTag::SuperSuperRare, 0.6, 2, "ssr")
            .with_titles(["Grand Piano", "Pipe Organ"]),
        RarityCategoryConfig::new(RarityTag::UltraRare, 0.2, 1, "ur").with_titles(["Conductor"]),
    ])
    .with_label("Encore")
    .with_extension("webp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLimits;

    #[test]
    fn test_builtins_are_valid() {
        let registry = builtin_registry();
        assert_eq!(registry.len(), 2);
        registry.validate(&ConfigLimits::default()).unwrap();
    }

    #[test]
    fn test_builtins_survive_json() {
        let registry = builtin_registry();
        let json = registry.to_json().unwrap();
        assert_eq!(GachaRegistry::from_json_str(&json).unwrap(), registry);
    }
}
