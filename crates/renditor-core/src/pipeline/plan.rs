//! Rendition plan construction: crop regions × presets → ordered jobs.
//!
//! The geometry string produced here is both the literal parameter token
//! the batch tool consumes and the artifact's filename stem. It must be
//! byte-for-byte reproducible for identical inputs: that determinism is
//! what lets repeated requests find previously generated artifacts instead
//! of inventing new paths.

use crate::preset::Preset;
use crate::source::SourceLocator;
use crate::types::{CropRegion, Plan, Rendition, RenditionGroup};

/// Builds the per-request rendition plan.
pub struct PlanBuilder<'a> {
    source: &'a SourceLocator,
    public_prefix: &'a str,
    rendition_suffix: &'a str,
}

impl<'a> PlanBuilder<'a> {
    /// Create a builder for one request.
    pub fn new(source: &'a SourceLocator, public_prefix: &'a str, rendition_suffix: &'a str) -> Self {
        Self {
            source,
            public_prefix,
            rendition_suffix,
        }
    }

    /// Expand every region × preset into a plan, sorted ascending by the
    /// region's target-canvas area.
    pub fn build(&self, regions: &[CropRegion], presets: &[Preset]) -> Plan {
        let mut plan = Plan {
            groups: regions
                .iter()
                .map(|region| self.group(region, presets))
                .collect(),
        };
        plan.sort_by_area();
        plan
    }

    fn group(&self, region: &CropRegion, presets: &[Preset]) -> RenditionGroup {
        RenditionGroup {
            source_name: region.name.clone(),
            source_area: region.source_area(),
            renditions: presets
                .iter()
                .map(|preset| self.rendition(region, preset))
                .collect(),
        }
    }

    fn rendition(&self, region: &CropRegion, preset: &Preset) -> Rendition {
        let geometry = geometry_spec(region, preset);
        let file_name = format!("{}.{}", geometry, self.source.ext);

        Rendition {
            output_path: self.source.base_dir.join(&file_name),
            public_url: format!(
                "{}/{}/{}",
                self.public_prefix, self.source.relative_path, file_name
            ),
            source_rendition_url: format!(
                "{}{}/{}",
                self.source.image_url, self.rendition_suffix, region.name
            ),
            geometry,
            resize_method: preset.resize_method,
            blur: preset.blur,
            quality: preset.quality,
            progressive: preset.progressive,
            size_kib: None,
        }
    }
}

/// Encode one region/preset pair as the batch tool's parameter token:
///
/// ```text
/// {crop_w}x{crop_h}+{crop_x}+{crop_y}+{width}x{height}+{method}+{blur}+{quality}+{progressive}
/// ```
///
/// Integers render in base-10; blur renders through `f64`'s `Display`
/// (`1`, `0.5`); progressive renders as `0`/`1`.
pub fn geometry_spec(region: &CropRegion, preset: &Preset) -> String {
    format!(
        "{}x{}+{}+{}+{}x{}+{}+{}+{}+{}",
        region.crop_width,
        region.crop_height,
        region.crop_x,
        region.crop_y,
        region.width,
        region.height,
        preset.resize_method.index(),
        preset.blur,
        preset.quality,
        preset.progressive as u8,
    )
}
