//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of domain data for queries.

mod similar_model;

pub use similar_model::{CategoryAssessment, SimilarModelView, SimilarModelsPage};
