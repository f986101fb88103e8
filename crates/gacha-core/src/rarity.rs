//! Rarity tiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rarity tier of a gacha category
///
/// Ordered from most to least common. Config files name tiers in
/// SCREAMING_SNAKE_CASE (`COMMON`, `SUPER_SUPER_RARE`, ...); any other tag
/// is rejected at parse time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RarityTag {
    Common,
    Uncommon,
    Rare,
    SuperRare,
    SuperSuperRare,
    UltraRare,
    SecretRare,
}

impl RarityTag {
    /// All tiers, most common first
    pub const ALL: [RarityTag; 7] = [
        RarityTag::Common,
        RarityTag::Uncommon,
        RarityTag::Rare,
        RarityTag::SuperRare,
        RarityTag::SuperSuperRare,
        RarityTag::UltraRare,
        RarityTag::SecretRare,
    ];

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            RarityTag::Common => "Common",
            RarityTag::Uncommon => "Uncommon",
            RarityTag::Rare => "Rare",
            RarityTag::SuperRare => "Super Rare",
            RarityTag::SuperSuperRare => "Super Super Rare",
            RarityTag::UltraRare => "Ultra Rare",
            RarityTag::SecretRare => "Secret Rare",
        }
    }

    /// Short card-style code (C, UC, R, SR, SSR, UR, SEC)
    pub fn code(&self) -> &'static str {
        match self {
            RarityTag::Common => "C",
            RarityTag::Uncommon => "UC",
            RarityTag::Rare => "R",
            RarityTag::SuperRare => "SR",
            RarityTag::SuperSuperRare => "SSR",
            RarityTag::UltraRare => "UR",
            RarityTag::SecretRare => "SEC",
        }
    }

    /// Config tag as written in files
    pub fn tag(&self) -> &'static str {
        match self {
            RarityTag::Common => "COMMON",
            RarityTag::Uncommon => "UNCOMMON",
            RarityTag::Rare => "RARE",
            RarityTag::SuperRare => "SUPER_RARE",
            RarityTag::SuperSuperRare => "SUPER_SUPER_RARE",
            RarityTag::UltraRare => "ULTRA_RARE",
            RarityTag::SecretRare => "SECRET_RARE",
        }
    }
}

impl fmt::Display for RarityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_tags_match_tag() {
        for rarity in RarityTag::ALL {
            let json = serde_json::to_string(&rarity).unwrap();
            assert_eq!(json, format!("\"{}\"", rarity.tag()));
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let parsed: Result<RarityTag, _> = serde_json::from_str("\"MYTHIC\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(RarityTag::Common < RarityTag::Rare);
        assert!(RarityTag::SuperSuperRare < RarityTag::SecretRare);
        assert_eq!(RarityTag::SecretRare.code(), "SEC");
    }
}
