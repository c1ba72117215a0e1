use serde::Serialize;
use tracing::trace;

use super::config::ScoringConfig;
use super::factors;
use crate::catalog::{Product, SkinProfile};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Melanin", "Undertone", "Safety"
    pub description: String, // e.g. "index 4 in range 3-5", "EWG Green x1.5"
    pub points: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
    /// Sum of all factors before the zero floor
    pub raw_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// A catalog product with its match score against one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl ScoredProduct {
    pub fn new(product: Product, match_score: f64) -> Self {
        Self {
            product,
            match_score,
            breakdown: None,
        }
    }

    pub fn category(&self) -> &str {
        &self.product.category
    }
}

/// Score one product. The result is never negative.
pub fn score_product(product: &Product, profile: &SkinProfile, config: &ScoringConfig) -> f64 {
    score_product_detailed(product, profile, config).score
}

/// Score one product and keep each factor's contribution.
///
/// Factors are summed and the sum is floored at zero; individual factors
/// (ingredients, safety) may be negative.
pub fn score_product_detailed(
    product: &Product,
    profile: &SkinProfile,
    config: &ScoringConfig,
) -> ScoreResult {
    let mut factors = Vec::with_capacity(6);

    let range = product.melanin_range();
    factors.push(FactorContribution {
        label: "Melanin".to_string(),
        description: format!(
            "index {} vs range {}-{}",
            profile.melanin_index, range.min, range.max
        ),
        points: factors::melanin(product, profile.melanin_index, &config.melanin),
    });

    factors.push(FactorContribution {
        label: "Undertone".to_string(),
        description: format!(
            "{} vs [{}]",
            profile.undertone,
            product.undertones.join(", ")
        ),
        points: factors::undertone(product, profile.undertone, &config.undertone),
    });

    factors.push(FactorContribution {
        label: "Skin type".to_string(),
        description: format!(
            "{} vs [{}]",
            profile.skin_type.as_deref().unwrap_or("unknown"),
            product.skin_types.join(", ")
        ),
        points: factors::skin_type(product, profile.skin_type.as_deref(), &config.skin_type),
    });

    factors.push(FactorContribution {
        label: "Concerns".to_string(),
        description: format!("{} profile concerns", profile.skin_concerns.len()),
        points: factors::concerns(product, &profile.skin_concerns, &config.concerns),
    });

    let signal = factors::ingredients(product, &profile.skin_concerns, &config.ingredients);
    factors.push(FactorContribution {
        label: "Ingredients".to_string(),
        description: format!(
            "{} beneficial ({:+}), {} irritant ({:+})",
            signal.beneficial_matches, signal.beneficial, signal.irritant_matches, signal.irritant
        ),
        points: signal.total(),
    });

    let sensitivity = profile
        .sensitivity_level
        .unwrap_or(config.safety.default_sensitivity);
    factors.push(FactorContribution {
        label: "Safety".to_string(),
        description: format!(
            "{} x{} (sensitivity {})",
            product.safety_rating.as_deref().unwrap_or("unrated"),
            config.safety.multiplier(Some(sensitivity)),
            sensitivity
        ),
        points: factors::safety(product, profile.sensitivity_level, &config.safety),
    });

    let raw_total: f64 = factors.iter().map(|f| f.points).sum();
    // Floor at zero; a NaN from a pathological config collapses to zero too
    let score = if raw_total > 0.0 { raw_total } else { 0.0 };

    trace!(product = %product.id, raw_total, score, "scored product");

    ScoreResult {
        score,
        breakdown: ScoreBreakdown { factors, raw_total },
    }
}

/// Score every product in catalog order.
pub fn score_catalog(
    products: &[Product],
    profile: &SkinProfile,
    config: &ScoringConfig,
) -> Vec<ScoredProduct> {
    products
        .iter()
        .map(|product| {
            let result = score_product_detailed(product, profile, config);
            ScoredProduct {
                product: product.clone(),
                match_score: result.score,
                breakdown: Some(result.breakdown),
            }
        })
        .collect()
}
