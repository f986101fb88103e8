//! Item materialization
//!
//! Items are never stored. A category with `count = n` stands for the items
//! with ids `1..=n`, and each item's asset path is derived from the version,
//! the category prefix and the id:
//!
//! ```text
//! <version>/<prefix>_<id>.<extension>      e.g. v1/ssr_3.png
//! ```

use serde::{Deserialize, Serialize};

use crate::config::RarityCategoryConfig;
use crate::error::{DrawError, DrawOutcome};

/// A concrete collectible
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GachaItem {
    /// 1-based id inside its category
    pub id: u32,
    /// Asset path
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl GachaItem {
    /// Same item with the asset extension swapped (e.g. png -> webp)
    pub fn with_extension(&self, extension: &str) -> GachaItem {
        let stem = match self.src.rsplit_once('.') {
            Some((stem, old)) if !old.contains('/') => stem,
            _ => self.src.as_str(),
        };
        GachaItem {
            id: self.id,
            src: format!("{}.{}", stem, extension),
            title: self.title.clone(),
        }
    }
}

/// Asset path of one item
pub fn item_path(version: &str, prefix: &str, id: u32, extension: &str) -> String {
    format!("{}/{}_{}.{}", version, prefix, id, extension)
}

/// Build item `id` of a category
pub fn materialize_item(
    version: &str,
    category: &RarityCategoryConfig,
    id: u32,
    extension: &str,
) -> GachaItem {
    GachaItem {
        id,
        src: item_path(version, &category.prefix, id, extension),
        title: category.title_for(id).map(str::to_string),
    }
}

/// Every item of a category, ids `1..=count`
pub fn materialize_items(
    version: &str,
    category: &RarityCategoryConfig,
    extension: &str,
) -> DrawOutcome<Vec<GachaItem>> {
    if category.count == 0 {
        return Err(DrawError::EmptyCategoryItems(category.name));
    }

    Ok((1..=category.count)
        .map(|id| materialize_item(version, category, id, extension))
        .collect())
}

/// Pick one item of a category uniformly
///
/// `u` is a uniform value in `[0, 1)`; the chosen index is `floor(u * count)`.
/// Only the chosen item is built, so cost does not depend on `count`.
pub fn select_item(
    version: &str,
    category: &RarityCategoryConfig,
    extension: &str,
    u: f64,
) -> DrawOutcome<GachaItem> {
    if category.count == 0 {
        return Err(DrawError::EmptyCategoryItems(category.name));
    }

    let last = category.count - 1;
    let index = ((u * f64::from(category.count)).floor() as u32).min(last);
    Ok(materialize_item(version, category, index + 1, extension))
}
