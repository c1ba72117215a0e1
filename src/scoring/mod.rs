pub mod config;
pub mod diversify;
pub mod engine;
pub mod factors;
pub mod validation;

pub use config::*;
pub use diversify::{diversify, diversify_with, recommend};
pub use engine::{
    score_catalog, score_product, score_product_detailed, FactorContribution, ScoreBreakdown,
    ScoreResult, ScoredProduct,
};
pub use validation::validate_scoring;
