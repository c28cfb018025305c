//! Post-execution artifact reconciliation.
//!
//! Runs only after a successful batch exit. Each expected artifact is
//! statted independently; a miss (absent file, permissions, transient I/O)
//! leaves that one rendition without a size and never aborts the rest —
//! partial success is the norm at this level.

use crate::types::Plan;

/// Attaches on-disk sizes to the renditions a batch run produced.
pub struct Reconciler;

impl Reconciler {
    /// Stat each expected output path and record its size in KiB
    /// (floor-divided).
    pub fn annotate(plan: &mut Plan) {
        for rendition in plan.renditions_mut() {
            match std::fs::metadata(&rendition.output_path) {
                Ok(meta) => rendition.size_kib = Some(meta.len() / 1024),
                Err(err) => {
                    tracing::debug!(
                        "no artifact at {}: {}",
                        rendition.output_path.display(),
                        err
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::ResizeMethod;
    use crate::types::{Rendition, RenditionGroup};
    use std::path::Path;

    fn plan_for(paths: &[&Path]) -> Plan {
        Plan {
            groups: vec![RenditionGroup {
                source_name: "thumb".to_string(),
                source_area: 2500,
                renditions: paths
                    .iter()
                    .map(|p| Rendition {
                        geometry: "spec".to_string(),
                        output_path: p.to_path_buf(),
                        public_url: "/thumbnails/spec.jpg".to_string(),
                        source_rendition_url: "https://host/img.jpg/r/thumb".to_string(),
                        resize_method: ResizeMethod::Thumbnail,
                        blur: 1.0,
                        quality: 80,
                        progressive: false,
                        size_kib: None,
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_attaches_sizes_in_kib() {
        let dir = tempfile::TempDir::new().unwrap();
        let artifact = dir.path().join("a.jpg");
        std::fs::write(&artifact, vec![0u8; 3 * 1024]).unwrap();

        let mut plan = plan_for(&[&artifact]);
        Reconciler::annotate(&mut plan);

        assert_eq!(plan.groups[0].renditions[0].size_kib, Some(3));
    }

    #[test]
    fn test_size_is_floor_divided() {
        let dir = tempfile::TempDir::new().unwrap();
        let artifact = dir.path().join("a.jpg");
        std::fs::write(&artifact, vec![0u8; 2047]).unwrap();

        let mut plan = plan_for(&[&artifact]);
        Reconciler::annotate(&mut plan);

        assert_eq!(plan.groups[0].renditions[0].size_kib, Some(1));
    }

    #[test]
    fn test_missing_artifact_leaves_size_absent_and_continues() {
        let dir = tempfile::TempDir::new().unwrap();
        let present = dir.path().join("present.jpg");
        let absent = dir.path().join("absent.jpg");
        std::fs::write(&present, vec![0u8; 1024]).unwrap();

        let mut plan = plan_for(&[&absent, &present]);
        Reconciler::annotate(&mut plan);

        assert_eq!(plan.groups[0].renditions[0].size_kib, None);
        assert_eq!(plan.groups[0].renditions[1].size_kib, Some(1));
    }
}
