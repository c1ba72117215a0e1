use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main scoring configuration.
///
/// Every point value and lookup table the engine uses lives here, so a
/// deployment can retune weights without touching code. Every section is
/// optional in YAML and falls back to the defaults below.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   melanin: { center: 25, in_range: 18, boundary: 10 }
///   safety:
///     default_sensitivity: 2
///     ratings:
///       "EWG Green": 15
///       "EWG Red": -5
///   diversify: { max_per_category: 2, total: 6 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub melanin: MelaninPoints,
    pub undertone: UndertonePoints,
    pub skin_type: SkinTypePoints,
    pub concerns: ConcernPoints,
    pub ingredients: IngredientConfig,
    pub safety: SafetyConfig,
    pub diversify: DiversifyOptions,
}

/// Points for how well the profile's melanin index sits in a product's range.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MelaninPoints {
    /// Index sits exactly on the range midpoint
    pub center: f64,
    pub in_range: f64,
    /// Index is one step outside the range
    pub boundary: f64,
}

impl Default for MelaninPoints {
    fn default() -> Self {
        Self {
            center: 25.0,
            in_range: 18.0,
            boundary: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UndertonePoints {
    pub exact: f64,
    /// Product lists "Neutral" but not the profile's undertone
    pub neutral: f64,
}

impl Default for UndertonePoints {
    fn default() -> Self {
        Self {
            exact: 15.0,
            neutral: 7.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SkinTypePoints {
    pub exact: f64,
    /// Awarded when either side has no skin type, or the product supports
    /// `fallback_type`
    pub fallback: f64,
    pub fallback_type: String,
}

impl Default for SkinTypePoints {
    fn default() -> Self {
        Self {
            exact: 15.0,
            fallback: 7.0,
            fallback_type: "normal".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConcernPoints {
    pub per_match: f64,
    pub max: f64,
}

impl Default for ConcernPoints {
    fn default() -> Self {
        Self {
            per_match: 5.0,
            max: 10.0,
        }
    }
}

/// Ingredient signal: beneficial keywords per concern and a flat irritant list.
///
/// Keywords are matched as lower-case substrings of each ingredient.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IngredientConfig {
    pub beneficial_per_match: f64,
    pub beneficial_max: f64,
    /// Applied once per irritant keyword present (negative)
    pub irritant_penalty: f64,
    pub beneficial: BTreeMap<String, Vec<String>>,
    pub irritants: Vec<String>,
}

impl Default for IngredientConfig {
    fn default() -> Self {
        let table: &[(&str, &[&str])] = &[
            (
                "dryness",
                &[
                    "hyaluronic acid",
                    "ceramide",
                    "squalane",
                    "glycerin",
                    "shea butter",
                    "snail secretion filtrate",
                ],
            ),
            (
                "aging",
                &["retinol", "peptide", "niacinamide", "vitamin c", "collagen", "ginseng"],
            ),
            (
                "acne",
                &["salicylic acid", "tea tree", "niacinamide", "centella asiatica", "zinc"],
            ),
            (
                "hyperpigmentation",
                &["vitamin c", "arbutin", "niacinamide", "licorice extract", "ascorbic acid"],
            ),
            (
                "dullness",
                &["vitamin c", "niacinamide", "aha", "rice extract", "ascorbic acid"],
            ),
            (
                "redness",
                &["centella asiatica", "green tea", "aloe vera", "beta-glucan", "panthenol"],
            ),
            ("uneven_tone", &["niacinamide", "vitamin c", "arbutin", "aha"]),
            ("sun_damage", &["vitamin c", "niacinamide", "green tea", "vitamin e"]),
        ];

        Self {
            beneficial_per_match: 5.0,
            beneficial_max: 12.0,
            irritant_penalty: -4.0,
            beneficial: table
                .iter()
                .map(|(concern, keywords)| {
                    (
                        concern.to_string(),
                        keywords.iter().map(|k| k.to_string()).collect(),
                    )
                })
                .collect(),
            irritants: ["fragrance", "alcohol", "denatured alcohol", "parfum", "synthetic dye"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Safety rating points, scaled by how sensitive the skin is.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SafetyConfig {
    /// Rating label -> base points. Unknown labels score 0.
    pub ratings: BTreeMap<String, f64>,
    /// Sensitivity used when the profile leaves it unset
    pub default_sensitivity: u8,
    pub high_threshold: u8,
    pub high_multiplier: f64,
    pub mid_threshold: u8,
    pub mid_multiplier: f64,
    pub low_multiplier: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            ratings: [
                ("EWG Green", 15.0),
                ("Vegan", 13.0),
                ("EWG Yellow", 5.0),
                ("EWG Red", -5.0),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),
            default_sensitivity: 2,
            high_threshold: 4,
            high_multiplier: 1.5,
            mid_threshold: 3,
            mid_multiplier: 1.0,
            low_multiplier: 0.7,
        }
    }
}

impl SafetyConfig {
    pub fn multiplier(&self, sensitivity: Option<u8>) -> f64 {
        let level = sensitivity.unwrap_or(self.default_sensitivity);
        if level >= self.high_threshold {
            self.high_multiplier
        } else if level >= self.mid_threshold {
            self.mid_multiplier
        } else {
            self.low_multiplier
        }
    }
}

/// Limits for category-diversified selection.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DiversifyOptions {
    pub max_per_category: usize,
    pub total: usize,
}

impl Default for DiversifyOptions {
    fn default() -> Self {
        Self {
            max_per_category: 2,
            total: 6,
        }
    }
}
