//! The six independent scoring factors.
//!
//! Each factor is a pure function of one product, the relevant part of the
//! profile and its config section. Missing product data falls through to the
//! documented fallback branch instead of failing.

use std::collections::BTreeSet;

use super::config::{
    ConcernPoints, IngredientConfig, MelaninPoints, SafetyConfig, SkinTypePoints, UndertonePoints,
};
use crate::catalog::{Product, Undertone};

/// Melanin fit: center, in range, one step outside, or nothing.
pub fn melanin(product: &Product, melanin_index: i32, points: &MelaninPoints) -> f64 {
    let range = product.melanin_range();
    if melanin_index as f64 == range.center() {
        points.center
    } else if range.contains(melanin_index) {
        points.in_range
    } else if range.near(melanin_index) {
        points.boundary
    } else {
        0.0
    }
}

pub fn undertone(product: &Product, undertone: Undertone, points: &UndertonePoints) -> f64 {
    let tones = &product.undertones;
    if tones.iter().any(|t| t == undertone.as_str()) {
        points.exact
    } else if tones.iter().any(|t| t == Undertone::Neutral.as_str()) {
        points.neutral
    } else {
        0.0
    }
}

pub fn skin_type(product: &Product, skin_type: Option<&str>, points: &SkinTypePoints) -> f64 {
    let types = &product.skin_types;
    let skin_type = match skin_type {
        Some(t) if !types.is_empty() => t,
        _ => return points.fallback,
    };

    if types.iter().any(|t| t == skin_type) {
        points.exact
    } else if types.iter().any(|t| *t == points.fallback_type) {
        points.fallback
    } else {
        0.0
    }
}

/// Capped points per profile concern the product also addresses.
pub fn concerns(product: &Product, profile_concerns: &[String], points: &ConcernPoints) -> f64 {
    let matches = profile_concerns
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|c| product.concerns.contains(c))
        .count();
    (matches as f64 * points.per_match).min(points.max)
}

/// Beneficial and irritant ingredient signal, split so callers can report
/// both halves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngredientSignal {
    pub beneficial_matches: usize,
    pub irritant_matches: usize,
    pub beneficial: f64,
    pub irritant: f64,
}

impl IngredientSignal {
    pub fn total(&self) -> f64 {
        self.beneficial + self.irritant
    }
}

pub fn ingredients(
    product: &Product,
    profile_concerns: &[String],
    config: &IngredientConfig,
) -> IngredientSignal {
    if product.ingredients.is_empty() {
        return IngredientSignal {
            beneficial_matches: 0,
            irritant_matches: 0,
            beneficial: 0.0,
            irritant: 0.0,
        };
    }

    let lowered: Vec<String> = product
        .ingredients
        .iter()
        .map(|i| i.to_lowercase())
        .collect();
    let present = |keyword: &str| lowered.iter().any(|i| i.contains(keyword));

    // A keyword shared by several concerns counts once
    let mut beneficial = BTreeSet::new();
    for concern in profile_concerns {
        let Some(keywords) = config.beneficial.get(concern) else {
            continue;
        };
        for keyword in keywords {
            if present(keyword.as_str()) {
                beneficial.insert(keyword.as_str());
            }
        }
    }

    let irritant_matches = config
        .irritants
        .iter()
        .filter(|k| present(k.as_str()))
        .count();

    IngredientSignal {
        beneficial_matches: beneficial.len(),
        irritant_matches,
        beneficial: (beneficial.len() as f64 * config.beneficial_per_match)
            .min(config.beneficial_max),
        irritant: irritant_matches as f64 * config.irritant_penalty,
    }
}

/// Rating points times the sensitivity multiplier. Can be negative.
pub fn safety(product: &Product, sensitivity: Option<u8>, config: &SafetyConfig) -> f64 {
    let base = product
        .safety_rating
        .as_deref()
        .and_then(|r| config.ratings.get(r))
        .copied()
        .unwrap_or(0.0);
    base * config.multiplier(sensitivity)
}
