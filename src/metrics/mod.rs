pub mod gap;
pub mod normalize;

pub use gap::{
    analyze_celeb_match, average_gap, difficulty, fallback_solutions, match_rate,
    per_metric_gap, validate_metrics, CelebMatch, CelebProfile, Difficulty, FiveMetrics,
    MetricGap, MetricsError,
};
pub use normalize::{apply_metrics_shift, normalize_metrics, NormalizedMetrics, RawFiveMetrics};
