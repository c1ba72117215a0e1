use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let points = [
        ("scoring.melanin.center", config.melanin.center),
        ("scoring.melanin.in_range", config.melanin.in_range),
        ("scoring.melanin.boundary", config.melanin.boundary),
        ("scoring.undertone.exact", config.undertone.exact),
        ("scoring.undertone.neutral", config.undertone.neutral),
        ("scoring.skin_type.exact", config.skin_type.exact),
        ("scoring.skin_type.fallback", config.skin_type.fallback),
        ("scoring.concerns.per_match", config.concerns.per_match),
        ("scoring.concerns.max", config.concerns.max),
        (
            "scoring.ingredients.beneficial_per_match",
            config.ingredients.beneficial_per_match,
        ),
        ("scoring.ingredients.beneficial_max", config.ingredients.beneficial_max),
        ("scoring.safety.high_multiplier", config.safety.high_multiplier),
        ("scoring.safety.mid_multiplier", config.safety.mid_multiplier),
        ("scoring.safety.low_multiplier", config.safety.low_multiplier),
    ];
    for (field, value) in points {
        if !value.is_finite() {
            errors.push(format!("{}: must be a finite number", field));
        } else if value < 0.0 {
            errors.push(format!("{}: must be non-negative", field));
        }
    }

    let penalty = config.ingredients.irritant_penalty;
    if !penalty.is_finite() || penalty > 0.0 {
        errors.push(format!(
            "scoring.ingredients.irritant_penalty: must be zero or negative, got {}",
            penalty
        ));
    }

    for (rating, value) in &config.safety.ratings {
        if !value.is_finite() {
            errors.push(format!(
                "scoring.safety.ratings['{}']: must be a finite number",
                rating
            ));
        }
    }

    let sensitivity = config.safety.default_sensitivity;
    if !(1..=5).contains(&sensitivity) {
        errors.push(format!(
            "scoring.safety.default_sensitivity: must be between 1 and 5, got {}",
            sensitivity
        ));
    }
    if config.safety.high_threshold < config.safety.mid_threshold {
        errors.push(format!(
            "scoring.safety.high_threshold: must be >= mid_threshold ({} < {})",
            config.safety.high_threshold, config.safety.mid_threshold
        ));
    }

    for (concern, keywords) in &config.ingredients.beneficial {
        for (i, keyword) in keywords.iter().enumerate() {
            check_keyword(
                &mut errors,
                &format!("scoring.ingredients.beneficial.{}[{}]", concern, i),
                keyword,
            );
        }
    }
    for (i, keyword) in config.ingredients.irritants.iter().enumerate() {
        check_keyword(
            &mut errors,
            &format!("scoring.ingredients.irritants[{}]", i),
            keyword,
        );
    }

    if config.diversify.max_per_category == 0 {
        errors.push("scoring.diversify.max_per_category: must be at least 1".to_string());
    }
    if config.diversify.total == 0 {
        errors.push("scoring.diversify.total: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// Ingredients are lower-cased before matching, so upper-case keywords never hit
fn check_keyword(errors: &mut Vec<String>, field: &str, keyword: &str) {
    if keyword.trim().is_empty() {
        errors.push(format!("{}: keyword must not be empty", field));
    } else if keyword.to_lowercase() != keyword {
        errors.push(format!(
            "{}: keyword '{}' must be lower-case",
            field, keyword
        ));
    }
}
