use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::normalize::NormalizedMetrics;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("{owner} metric '{metric}' must be a number between 0 and 100, got {value}")]
    OutOfRange {
        owner: &'static str,
        metric: &'static str,
        value: f64,
    },
}

/// The five facial metrics already on the 0..=100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiveMetrics {
    pub visual_weight: f64,
    pub canthal_tilt: f64,
    pub midface_ratio: f64,
    pub luminosity: f64,
    pub harmony: f64,
}

impl FiveMetrics {
    /// Labeled values in reporting order.
    pub fn labeled(&self) -> [(&'static str, f64); 5] {
        [
            ("Visual Weight", self.visual_weight),
            ("Canthal Tilt", self.canthal_tilt),
            ("Mid-face Ratio", self.midface_ratio),
            ("Luminosity", self.luminosity),
            ("Harmony", self.harmony),
        ]
    }
}

impl From<NormalizedMetrics> for FiveMetrics {
    fn from(m: NormalizedMetrics) -> Self {
        Self {
            visual_weight: m.vw,
            canthal_tilt: m.ct,
            midface_ratio: m.mf,
            luminosity: m.ls,
            harmony: m.hi,
        }
    }
}

/// A reference look to compare against.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CelebProfile {
    pub celeb_id: String,
    pub celeb_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub signature_look: Option<String>,
    pub five_metrics: FiveMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricGap {
    pub metric: &'static str,
    pub user_value: f64,
    pub celeb_value: f64,
    /// user - celeb
    pub gap: f64,
    pub normalized_gap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Challenging => "challenging",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CelebMatch {
    pub match_rate: u8,
    pub celeb_id: String,
    pub celeb_name: String,
    pub category: String,
    pub signature_look: Option<String>,
    pub per_metric_gap: Vec<MetricGap>,
    pub average_gap: f64,
    pub difficulty: Difficulty,
    pub solutions: Vec<String>,
}

pub fn validate_metrics(metrics: &FiveMetrics, owner: &'static str) -> Result<(), MetricsError> {
    for (metric, value) in metrics.labeled() {
        if !(0.0..=100.0).contains(&value) {
            return Err(MetricsError::OutOfRange {
                owner,
                metric,
                value,
            });
        }
    }
    Ok(())
}

pub fn per_metric_gap(user: &FiveMetrics, celeb: &FiveMetrics) -> Vec<MetricGap> {
    user.labeled()
        .into_iter()
        .zip(celeb.labeled())
        .map(|((metric, user_value), (_, celeb_value))| {
            let gap = user_value - celeb_value;
            MetricGap {
                metric,
                user_value,
                celeb_value,
                gap,
                normalized_gap: gap.abs(),
            }
        })
        .collect()
}

pub fn average_gap(gaps: &[MetricGap]) -> f64 {
    if gaps.is_empty() {
        return 0.0;
    }
    gaps.iter().map(|g| g.normalized_gap).sum::<f64>() / gaps.len() as f64
}

/// 100 minus the mean absolute gap, rounded and clamped to 0..=100.
pub fn match_rate(gaps: &[MetricGap]) -> u8 {
    (100.0 - average_gap(gaps)).round().clamp(0.0, 100.0) as u8
}

pub fn difficulty(average_gap: f64) -> Difficulty {
    if average_gap < 15.0 {
        Difficulty::Easy
    } else if average_gap < 30.0 {
        Difficulty::Moderate
    } else {
        Difficulty::Challenging
    }
}

/// Deterministic per-metric advice used when no generative backend is wired in.
pub fn fallback_solutions(gaps: &[MetricGap]) -> Vec<String> {
    gaps.iter()
        .map(|g| {
            format!(
                "Bridge {} gap of {} with targeted technique adjustments.",
                g.metric,
                format_signed(g.gap)
            )
        })
        .collect()
}

fn format_signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", value)
    } else {
        format!("{}", value)
    }
}

/// Compare a user's metrics with a celeb's look.
pub fn analyze_celeb_match(
    user: &FiveMetrics,
    celeb: &CelebProfile,
) -> Result<CelebMatch, MetricsError> {
    validate_metrics(user, "user")?;
    validate_metrics(&celeb.five_metrics, "celeb")?;

    let gaps = per_metric_gap(user, &celeb.five_metrics);
    let average = average_gap(&gaps);
    let rate = match_rate(&gaps);
    debug!(celeb = %celeb.celeb_id, match_rate = rate, average_gap = average, "analyzed celeb match");

    Ok(CelebMatch {
        match_rate: rate,
        celeb_id: celeb.celeb_id.clone(),
        celeb_name: celeb.celeb_name.clone(),
        category: celeb.category.clone(),
        signature_look: celeb.signature_look.clone(),
        solutions: fallback_solutions(&gaps),
        difficulty: difficulty(average),
        average_gap: average,
        per_metric_gap: gaps,
    })
}
