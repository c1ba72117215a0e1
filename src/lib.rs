pub mod catalog;
pub mod color;
pub mod config;
pub mod metrics;
pub mod output;
pub mod scoring;
pub mod service;
pub mod telemetry;
