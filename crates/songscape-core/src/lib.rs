//! Songscape Core - Embedding-space exploration for ground-truth vs. predicted song embeddings
//!
//! A request flows through:
//! dataset filter → projection → cluster selection → representatives,
//! with the projected axes additionally interpreted against audio features.

pub mod config;
pub mod types;
pub mod semantics;
pub mod dataset;
pub mod context;
pub mod projection;
pub mod clustering;
pub mod representatives;
pub mod interpret;
pub mod pipeline;
pub mod session;

pub use context::AnalysisContext;
pub use pipeline::{
    catalog_summary, run_analysis, AnalysisError, AnalysisOutcome, AnalysisRequest, AnalysisResult,
};
pub use session::SessionStore;
pub use types::*;
