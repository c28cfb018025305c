//! Core data types for the rendition batch pipeline.
//!
//! These types carry one request from parsed metadata through planning,
//! execution, and reconciliation. They are built once per request and never
//! shared across requests.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::preset::ResizeMethod;

/// One named crop region parsed out of the metadata document.
///
/// All fields come from the document; the crop box is not validated against
/// the declared canvas here (the batch tool rejects impossible geometry on
/// its own).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Rendition name the region was filed under, kept for provenance
    pub name: String,

    /// Crop box origin, x
    pub crop_x: u32,

    /// Crop box origin, y
    pub crop_y: u32,

    /// Crop box width
    pub crop_width: u32,

    /// Crop box height
    pub crop_height: u32,

    /// Target canvas width
    pub width: u32,

    /// Target canvas height
    pub height: u32,
}

impl CropRegion {
    /// Area of the declared target canvas; the plan's ordering key.
    pub fn source_area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// One concrete transform job: a single output of the batch tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rendition {
    /// The delimited parameter token the batch tool consumes; also the
    /// artifact's filename stem, so identical parameters always resolve to
    /// the same file
    pub geometry: String,

    /// Where the batch tool writes this output
    pub output_path: PathBuf,

    /// Externally servable path mirroring `output_path` under the public
    /// prefix
    pub public_url: String,

    /// Which named rendition in the original document this came from
    pub source_rendition_url: String,

    /// Resize filter used
    pub resize_method: ResizeMethod,

    /// Blur magnitude used
    pub blur: f64,

    /// Compression quality used
    pub quality: u8,

    /// Whether progressive encoding was requested
    pub progressive: bool,

    /// Artifact size in KiB, attached by reconciliation; absent until then,
    /// and stays absent if the artifact was never produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_kib: Option<u64>,
}

/// The renditions derived from one crop region: one per preset, in preset
/// order. Groups are the unit of plan ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenditionGroup {
    /// Name of the originating crop region
    pub source_name: String,

    /// Target canvas area of the originating region
    pub source_area: u64,

    /// One rendition per preset
    pub renditions: Vec<Rendition>,
}

/// The fully expanded, pre-execution set of rendition jobs for one request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    pub groups: Vec<RenditionGroup>,
}

impl Plan {
    /// True when the plan carries no jobs at all; an empty plan skips the
    /// batch tool entirely.
    pub fn is_empty(&self) -> bool {
        self.rendition_count() == 0
    }

    /// Number of rendition groups (one per valid crop region).
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of transform jobs across all groups.
    pub fn rendition_count(&self) -> usize {
        self.groups.iter().map(|g| g.renditions.len()).sum()
    }

    /// All renditions in plan order (group order, then preset order).
    pub fn renditions(&self) -> impl Iterator<Item = &Rendition> {
        self.groups.iter().flat_map(|g| g.renditions.iter())
    }

    /// Mutable variant of [`Plan::renditions`], for reconciliation.
    pub fn renditions_mut(&mut self) -> impl Iterator<Item = &mut Rendition> {
        self.groups.iter_mut().flat_map(|g| g.renditions.iter_mut())
    }

    /// Order groups ascending by source area. The sort is stable, so
    /// equal-area groups keep their document order.
    pub fn sort_by_area(&mut self) {
        self.groups.sort_by_key(|g| g.source_area);
    }
}

/// The final annotated product of one batch request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// The source image the batch was generated from
    pub image_url: String,

    /// Wall-clock duration of the batch-tool invocation in milliseconds
    /// (zero when the plan was empty and the tool never ran)
    pub took_ms: u64,

    /// The sorted plan, annotated with artifact sizes
    pub groups: Vec<RenditionGroup>,
}
