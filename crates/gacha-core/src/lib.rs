//! # gacha-core — Gacha draw engine for the club mini-game
//!
//! Weighted random selection over configurable rarity tiers, followed by a
//! uniform pick of one concrete item inside the chosen tier.
//!
//! ## Architecture
//!
//! ```text
//! GachaEngine
//!     │
//!     ├── GachaRegistry (version → VersionConfig)
//!     └── RandomSource  (ChaCha8 by default, stub sequences in tests)
//!           │
//!           v
//!     compute_frequencies → pick_category → select_item
//!           │
//!           v
//!     DrawResult { item, rarity }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut engine = GachaEngine::seeded(presets::builtin_registry(), 42);
//! let result = engine.draw("v1")?;
//! println!("{} {}", result.rarity, result.item.src);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod frequency;
pub mod materializer;
pub mod picker;
pub mod presets;
pub mod random;
pub mod rarity;
pub mod rates;
pub mod stats;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use frequency::*;
pub use materializer::*;
pub use picker::*;
pub use random::*;
pub use rarity::*;
pub use rates::*;
pub use stats::*;
