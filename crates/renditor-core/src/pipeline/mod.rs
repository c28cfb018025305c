//! Rendition batch pipeline stages.
//!
//! This module contains all the stages of the batch pipeline:
//! - **metadata**: parse crop regions out of the renditions document
//! - **plan**: expand regions × presets into ordered transform jobs
//! - **executor**: one external batch invocation for the whole plan
//! - **reconcile**: attach artifact sizes after a successful run
//! - **retrieve**: fetch the source image and metadata document via curl
//! - **processor**: orchestrates the full request

pub mod executor;
pub mod metadata;
pub mod plan;
pub mod processor;
pub mod reconcile;
pub mod retrieve;

// Re-exports for convenient access
pub use executor::{BatchExecutor, ExecOutcome};
pub use metadata::MetadataParser;
pub use plan::{geometry_spec, PlanBuilder};
pub use processor::RenditionPipeline;
pub use reconcile::Reconciler;
pub use retrieve::Retriever;
