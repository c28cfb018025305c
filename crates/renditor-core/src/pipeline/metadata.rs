//! Crop-metadata document parsing.
//!
//! The renditions document is arbitrary untyped JSON mapping rendition
//! names to values of any shape. Real documents carry plenty of auxiliary
//! non-crop entries, so parsing is intentionally lenient: an entry either
//! yields a fully validated [`CropRegion`] or is skipped, and a skip never
//! fails the parse.
//!
//! Regions come out in document order (`serde_json`'s `preserve_order`
//! map); the plan sorter's stable tie-break relies on that.

use serde_json::{Map, Value};

use crate::types::CropRegion;

/// Parses crop regions out of a loosely-typed renditions document.
pub struct MetadataParser;

impl MetadataParser {
    /// Extract every valid crop region from the document root.
    ///
    /// An entry is valid when it is an object flagged `shouldCrop: true`
    /// that carries all six dimension fields. Anything else is skipped. A
    /// root that is not an object yields no regions.
    pub fn parse(root: &Value) -> Vec<CropRegion> {
        let map = match root.as_object() {
            Some(map) => map,
            None => return Vec::new(),
        };

        map.iter()
            .filter_map(|(name, entry)| {
                let region = Self::parse_entry(name, entry);
                if region.is_none() {
                    tracing::trace!("skipping rendition entry: {}", name);
                }
                region
            })
            .collect()
    }

    /// Fallible construction of one region; `None` means "skip this entry".
    fn parse_entry(name: &str, entry: &Value) -> Option<CropRegion> {
        let fields = entry.as_object()?;
        if !fields.get("shouldCrop")?.as_bool()? {
            return None;
        }

        Some(CropRegion {
            name: name.to_string(),
            crop_x: Self::dimension(fields, "cropX")?,
            crop_y: Self::dimension(fields, "cropY")?,
            crop_width: Self::dimension(fields, "cropWidth")?,
            crop_height: Self::dimension(fields, "cropHeight")?,
            width: Self::dimension(fields, "width")?,
            height: Self::dimension(fields, "height")?,
        })
    }

    fn dimension(fields: &Map<String, Value>, key: &str) -> Option<u32> {
        fields.get(key)?.as_u64()?.try_into().ok()
    }
}
