use serde::{Deserialize, Serialize};

const METRIC_MAX: f64 = 100.0;

// Canthal tilt angles map linearly from [-10, +15] degrees onto 0..100
const TILT_MIN_DEGREES: f64 = -10.0;
const TILT_SPAN_DEGREES: f64 = 25.0;

// Mid-face ratio maps inversely from [25, 45] percent onto 100..0
const MIDFACE_MAX_PERCENT: f64 = 45.0;
const MIDFACE_SPAN_PERCENT: f64 = 20.0;

const LUMINOSITY_UNKNOWN: f64 = 50.0;

fn clamp_metric(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, METRIC_MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualWeight {
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanthalTilt {
    pub angle_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MidfaceRatio {
    pub ratio_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Luminosity {
    pub current: f64,
    pub potential: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonyIndex {
    pub overall: f64,
}

/// Facial measurements as reported by the analysis backend, in their native
/// units. Descriptive fields the backend adds are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFiveMetrics {
    pub visual_weight: VisualWeight,
    pub canthal_tilt: CanthalTilt,
    pub midface_ratio: MidfaceRatio,
    pub luminosity: Luminosity,
    pub harmony_index: HarmonyIndex,
}

/// The five metrics on a common 0..=100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct NormalizedMetrics {
    #[serde(rename = "VW")]
    pub vw: f64,
    #[serde(rename = "CT")]
    pub ct: f64,
    #[serde(rename = "MF")]
    pub mf: f64,
    #[serde(rename = "LS")]
    pub ls: f64,
    #[serde(rename = "HI")]
    pub hi: f64,
}

impl NormalizedMetrics {
    pub fn uniform(value: f64) -> Self {
        Self {
            vw: value,
            ct: value,
            mf: value,
            ls: value,
            hi: value,
        }
    }
}

/// Map raw measurements onto 0..=100.
///
/// A lower mid-face ratio reads as more youthful, so that axis is inverted.
/// Luminosity without a positive potential has no meaningful ratio and
/// reports the midpoint.
pub fn normalize_metrics(raw: &RawFiveMetrics) -> NormalizedMetrics {
    let ls = if raw.luminosity.potential > 0.0 {
        clamp_metric(raw.luminosity.current / raw.luminosity.potential * METRIC_MAX)
    } else {
        LUMINOSITY_UNKNOWN
    };

    NormalizedMetrics {
        vw: clamp_metric(raw.visual_weight.score),
        ct: clamp_metric(
            (raw.canthal_tilt.angle_degrees - TILT_MIN_DEGREES) / TILT_SPAN_DEGREES * METRIC_MAX,
        ),
        mf: clamp_metric(
            (MIDFACE_MAX_PERCENT - raw.midface_ratio.ratio_percent) / MIDFACE_SPAN_PERCENT
                * METRIC_MAX,
        ),
        ls,
        hi: clamp_metric(raw.harmony_index.overall),
    }
}

/// Add a per-axis shift (e.g. a projected makeup effect), clamping each axis.
pub fn apply_metrics_shift(base: &NormalizedMetrics, shift: &NormalizedMetrics) -> NormalizedMetrics {
    NormalizedMetrics {
        vw: clamp_metric(base.vw + shift.vw),
        ct: clamp_metric(base.ct + shift.ct),
        mf: clamp_metric(base.mf + shift.mf),
        ls: clamp_metric(base.ls + shift.ls),
        hi: clamp_metric(base.hi + shift.hi),
    }
}
