//! Category frequency calculation

use crate::config::RarityCategoryConfig;

/// A category annotated with its total weight (`probability * count`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RarityCategoryFrequency<'a> {
    pub category: &'a RarityCategoryConfig,
    pub total_frequency: f64,
}

/// Annotate each category with its total weight, keeping order
pub fn compute_frequencies(categories: &[RarityCategoryConfig]) -> Vec<RarityCategoryFrequency<'_>> {
    categories
        .iter()
        .map(|category| RarityCategoryFrequency {
            category,
            total_frequency: category.probability * f64::from(category.count),
        })
        .collect()
}

/// Sum of all total frequencies
pub fn total_weight(frequencies: &[RarityCategoryFrequency<'_>]) -> f64 {
    frequencies.iter().map(|f| f.total_frequency).sum()
}
