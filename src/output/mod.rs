pub mod formatter;

pub use formatter::{
    format_gap_report, format_recommendations, format_rendered, format_score, format_swatch_set,
    format_tsv, should_use_colors,
};
