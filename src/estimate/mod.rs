// src/estimate/mod.rs
// =============================================================================
// This module handles a full page-weight estimation.
//
// Features:
// - Fetches exactly one page (no crawling into linked pages)
// - Probes every embedded resource that page references
// - Optional category filter (images, documents, media, other)
// - Optional concurrent probing that keeps discovery order in the report
// =============================================================================

mod estimator;
mod report;

pub use estimator::{EstimateError, EstimationRequest, Estimator};
pub use report::{Report, ResourceEntry};
