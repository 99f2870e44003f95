//! Core Module - Scoring Engine
//!
//! Metric estimation, reputation scoring and compromise analysis.

pub mod compromise;
pub mod engine;
pub mod estimator;
pub mod reputation;

pub use compromise::*;
pub use engine::*;
pub use estimator::*;
pub use reputation::*;
