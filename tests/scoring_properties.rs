use std::collections::HashMap;

use proptest::prelude::*;

use glowmatch::catalog::{Product, SkinProfile, Undertone};
use glowmatch::color::{render_color_on_skin, BlendMode, OpacityClass};
use glowmatch::scoring::{diversify, score_catalog, score_product, ScoringConfig};

const CATEGORIES: [&str; 4] = ["base", "lip", "eye", "skincare"];
const TONES: [&str; 3] = ["Warm", "Cool", "Neutral"];
const TYPES: [&str; 4] = ["dry", "oily", "normal", "combination"];
const CONCERNS: [&str; 4] = ["dryness", "acne", "redness", "dullness"];
const INGREDIENTS: [&str; 6] = [
    "Glycerin",
    "Niacinamide",
    "Fragrance",
    "Centella Asiatica Extract",
    "Denatured Alcohol",
    "Water",
];
const RATINGS: [&str; 5] = ["EWG Green", "Vegan", "EWG Yellow", "EWG Red", "Unknown"];

fn pick(items: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::sample::select(items).prop_map(|s| s.to_string())
}

fn product_strategy() -> impl Strategy<Value = Product> {
    (
        (
            0usize..1000,
            pick(&CATEGORIES),
            1i32..=6,
            0i32..=3,
            prop::collection::vec(pick(&TONES), 0..3),
        ),
        (
            prop::collection::vec(pick(&TYPES), 0..3),
            prop::collection::vec(pick(&CONCERNS), 0..3),
            prop::collection::vec(pick(&INGREDIENTS), 0..5),
            prop::option::of(pick(&RATINGS)),
        ),
    )
        .prop_map(
            |((n, category, min, span, undertones), (skin_types, concerns, ingredients, rating))| {
                Product {
                    id: format!("p{}", n),
                    brand: "Brand".to_string(),
                    name: format!("Product {}", n),
                    category,
                    subcategory: None,
                    melanin_min: min,
                    melanin_max: (min + span).min(6),
                    undertones,
                    skin_types,
                    concerns,
                    ingredients,
                    safety_rating: rating,
                    shade_hex: None,
                    price_usd: None,
                }
            },
        )
}

fn profile_strategy() -> impl Strategy<Value = SkinProfile> {
    (
        1i32..=6,
        prop::sample::select(vec![Undertone::Warm, Undertone::Cool, Undertone::Neutral]),
        prop::option::of(pick(&TYPES)),
        prop::option::of(1u8..=5),
        prop::collection::vec(pick(&CONCERNS), 0..4),
    )
        .prop_map(
            |(melanin_index, undertone, skin_type, sensitivity_level, skin_concerns)| SkinProfile {
                melanin_index,
                undertone,
                skin_type,
                sensitivity_level,
                skin_concerns,
            },
        )
}

proptest! {
    #[test]
    fn scores_are_never_negative(product in product_strategy(), profile in profile_strategy()) {
        let score = score_product(&product, &profile, &ScoringConfig::default());
        prop_assert!(score >= 0.0);
        prop_assert!(score.is_finite());
    }

    #[test]
    fn scoring_is_deterministic(product in product_strategy(), profile in profile_strategy()) {
        let config = ScoringConfig::default();
        prop_assert_eq!(
            score_product(&product, &profile, &config),
            score_product(&product, &profile, &config)
        );
    }

    #[test]
    fn diversify_respects_caps(
        products in prop::collection::vec(product_strategy(), 0..30),
        profile in profile_strategy(),
        max_per_category in 1usize..4,
        total in 1usize..10,
    ) {
        let scored = score_catalog(&products, &profile, &ScoringConfig::default());
        let picks = diversify(scored, max_per_category, total);

        prop_assert!(picks.len() <= total);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for pick in &picks {
            *counts.entry(pick.category()).or_default() += 1;
        }
        prop_assert!(counts.values().all(|&n| n <= max_per_category));
        prop_assert!(picks.windows(2).all(|w| w[0].match_score >= w[1].match_score));
    }

    #[test]
    fn rendered_colors_are_valid_hex(
        skin in (any::<u8>(), any::<u8>(), any::<u8>()),
        product in (any::<u8>(), any::<u8>(), any::<u8>()),
        melanin in prop::option::of(-10i32..20),
    ) {
        let skin_hex = format!("#{:02x}{:02x}{:02x}", skin.0, skin.1, skin.2);
        let product_hex = format!("#{:02X}{:02X}{:02X}", product.0, product.1, product.2);
        for class in OpacityClass::ALL {
            for mode in [BlendMode::Multiply, BlendMode::Screen] {
                let hex = render_color_on_skin(&skin_hex, &product_hex, class, melanin, mode).unwrap();
                prop_assert_eq!(hex.len(), 7);
                prop_assert!(hex.starts_with('#'));
                prop_assert!(hex[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
            }
        }
    }
}
