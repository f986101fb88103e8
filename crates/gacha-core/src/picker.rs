//! Weighted category picker

use crate::error::{DrawError, DrawOutcome};
use crate::frequency::RarityCategoryFrequency;

/// Pick a category by cumulative weight
///
/// `r` is expected in `[0, total_weight)`. Categories are walked in order and
/// the first one whose running sum reaches `r` wins. If none does (float
/// drift, or `r` past the total) the first category is returned.
pub fn pick_category<'c, 'a>(
    categories: &'c [RarityCategoryFrequency<'a>],
    r: f64,
    total_weight: f64,
) -> DrawOutcome<&'c RarityCategoryFrequency<'a>> {
    if categories.is_empty() || !(total_weight > 0.0) {
        return Err(DrawError::EmptyCategorySet);
    }

    let mut cumulative = 0.0;
    for frequency in categories {
        cumulative += frequency.total_frequency;
        if cumulative >= r {
            return Ok(frequency);
        }
    }

    log::warn!(
        "No category reached r={} (cumulative={}, total={}), falling back to first",
        r,
        cumulative,
        total_weight
    );
    Ok(&categories[0])
}
