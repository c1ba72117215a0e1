use std::collections::HashMap;
use std::io::Write;

use glowmatch::catalog::{load_catalog, load_profile};
use glowmatch::color::{preview_product_shade, RenderConfig};
use glowmatch::config::{load_config, validate_config};
use glowmatch::scoring::{recommend, score_product, ScoringConfig};
use glowmatch::service::handle_json;

const CATALOG: &str = r##"[
  {
    "id": "laneige-cushion",
    "brand": "Laneige",
    "name_en": "Neo Cushion",
    "category": "base",
    "melanin_min": 3,
    "melanin_max": 5,
    "undertones": ["Warm"],
    "skin_types": ["dry"],
    "concerns": ["dryness"],
    "ingredients": ["Glycerin", "Ceramide NP"],
    "safety_rating": "EWG Green",
    "shade_hex": "#C89F7C",
    "price_usd": 34.0,
    "created_at": "2024-01-01"
  },
  {
    "id": "pale-foundation",
    "brand": "Brand",
    "name": "Porcelain Foundation",
    "category": "base",
    "melanin_min": 1,
    "melanin_max": 2,
    "undertones": ["Cool"],
    "skin_types": ["oily"],
    "ingredients": ["Fragrance"]
  },
  {
    "id": "mid-foundation",
    "brand": "Brand",
    "name": "Honey Foundation",
    "category": "base",
    "melanin_min": 3,
    "melanin_max": 6,
    "undertones": ["Neutral"]
  },
  {
    "id": "rom-tint",
    "brand": "Rom&nd",
    "name": "Juicy Tint",
    "category": "lip",
    "melanin_min": 2,
    "melanin_max": 5,
    "undertones": ["Warm", "Neutral"],
    "shade_hex": "#B5523B"
  },
  {
    "id": "peri-tint",
    "brand": "Peripera",
    "name": "Ink Velvet",
    "category": "lip",
    "melanin_min": 4,
    "melanin_max": 4,
    "undertones": ["Warm"]
  },
  {
    "id": "clio-palette",
    "brand": "Clio",
    "name": "Pro Eye Palette",
    "category": "eye",
    "melanin_min": 1,
    "melanin_max": 6
  }
]"##;

const PROFILE: &str = r#"
melaninIndex: 4
undertone: Warm
skinType: dry
sensitivityLevel: 3
skinConcerns:
  - dryness
"#;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_recommend_from_files() {
    let catalog_file = write_temp(".json", CATALOG);
    let profile_file = write_temp(".yaml", PROFILE);

    let catalog = load_catalog(catalog_file.path()).unwrap();
    let profile = load_profile(profile_file.path()).unwrap();
    assert_eq!(catalog.len(), 6);

    let picks = recommend(&catalog, &profile, &ScoringConfig::default());

    // Default diversification: at most 2 per category, 6 overall
    let mut per_category: HashMap<&str, usize> = HashMap::new();
    for pick in &picks {
        *per_category.entry(pick.category()).or_default() += 1;
    }
    assert!(per_category.values().all(|&n| n <= 2));
    assert!(picks.len() <= 6);
    assert_eq!(picks.len(), 5);

    // Non-increasing scores
    assert!(picks
        .windows(2)
        .all(|w| w[0].match_score >= w[1].match_score));

    // Perfect fit ranks first with its known score
    assert_eq!(picks[0].product.id, "laneige-cushion");
    assert_eq!(picks[0].match_score, 85.0);

    // Third base product is the weakest and gets dropped
    assert!(!picks.iter().any(|p| p.product.id == "pale-foundation"));

    // Every pick keeps its breakdown for explanation
    assert!(picks.iter().all(|p| p.breakdown.is_some()));
}

#[test]
fn test_scores_match_single_product_scoring() {
    let catalog_file = write_temp(".json", CATALOG);
    let profile_file = write_temp(".yaml", PROFILE);
    let catalog = load_catalog(catalog_file.path()).unwrap();
    let profile = load_profile(profile_file.path()).unwrap();
    let config = ScoringConfig::default();

    for pick in recommend(&catalog, &profile, &config) {
        assert_eq!(pick.match_score, score_product(&pick.product, &profile, &config));
    }
}

#[test]
fn test_configured_diversification() {
    let config_file = write_temp(
        ".yaml",
        "scoring:\n  diversify:\n    max_per_category: 1\n    total: 2\n",
    );
    let config = load_config(Some(config_file.path().to_path_buf())).unwrap();
    assert!(validate_config(&config).is_ok());

    let catalog_file = write_temp(".json", CATALOG);
    let profile_file = write_temp(".yaml", PROFILE);
    let catalog = load_catalog(catalog_file.path()).unwrap();
    let profile = load_profile(profile_file.path()).unwrap();

    let picks = recommend(&catalog, &profile, &config.scoring);
    assert_eq!(picks.len(), 2);
    assert_ne!(picks[0].category(), picks[1].category());
}

#[test]
fn test_request_handler_end_to_end() {
    let catalog_file = write_temp(".json", CATALOG);
    let catalog = load_catalog(catalog_file.path()).unwrap();

    let (status, body) = handle_json(
        r#"{"skinProfile": {"melaninIndex": 4, "undertone": "Warm", "skinType": "dry", "skinConcerns": ["dryness"]}}"#,
        &catalog,
        &ScoringConfig::default(),
    );
    assert_eq!(status, 200);

    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    let recs = value["recommendations"].as_array().unwrap();
    assert_eq!(recs[0]["id"], "laneige-cushion");
    assert_eq!(recs[0]["matchScore"], 85.0);
    assert!(recs[0].get("breakdown").is_none());

    let (status, body) = handle_json(r#"{"skinProfile": {}}"#, &catalog, &ScoringConfig::default());
    assert_eq!(status, 400);
    assert!(body.contains("melaninIndex"));
}

#[test]
fn test_shade_preview_for_recommendations() {
    let catalog_file = write_temp(".json", CATALOG);
    let catalog = load_catalog(catalog_file.path()).unwrap();
    let render = RenderConfig::default();

    let with_shade: Vec<_> = catalog
        .iter()
        .filter_map(|p| preview_product_shade(&render, p, "#8B6547", Some(4)))
        .collect();
    assert_eq!(with_shade.len(), 2);
    for set in with_shade {
        let set = set.unwrap();
        assert_eq!(set.matte.len(), 7);
        assert!(set.matte.starts_with('#'));
    }
}
