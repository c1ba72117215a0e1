use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use super::config::{DiversifyOptions, ScoringConfig};
use super::engine::{score_catalog, ScoredProduct};
use crate::catalog::{Product, SkinProfile};

/// Greedy, category-capped top-K selection.
///
/// Products are ordered by score descending (stable, so equal scores keep
/// their input order), then walked once. A product whose category already
/// holds `max_per_category` entries is skipped for good, even if the result
/// ends up shorter than `total`.
pub fn diversify(
    mut scored: Vec<ScoredProduct>,
    max_per_category: usize,
    total: usize,
) -> Vec<ScoredProduct> {
    scored.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });

    let mut category_counts: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(total.min(scored.len()));

    for product in scored {
        if result.len() >= total {
            break;
        }

        let count = category_counts
            .entry(product.category().to_string())
            .or_insert(0);
        if *count >= max_per_category {
            debug!(
                product = %product.product.id,
                category = product.category(),
                "category full, skipping"
            );
            continue;
        }

        *count += 1;
        result.push(product);
    }

    result
}

pub fn diversify_with(scored: Vec<ScoredProduct>, options: DiversifyOptions) -> Vec<ScoredProduct> {
    diversify(scored, options.max_per_category, options.total)
}

/// Score a catalog against a profile and return the diversified picks.
///
/// This is the one path both in-process callers and the request handler use.
pub fn recommend(
    products: &[Product],
    profile: &SkinProfile,
    config: &ScoringConfig,
) -> Vec<ScoredProduct> {
    let scored = score_catalog(products, profile, config);
    let picks = diversify_with(scored, config.diversify);
    debug!(
        catalog = products.len(),
        picked = picks.len(),
        "built recommendations"
    );
    picks
}
