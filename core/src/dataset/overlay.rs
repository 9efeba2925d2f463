use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Paths tying a raster map image to its geographic bounding box.
///
/// Pure metadata for the rendering layer. The bounding-box file is
/// expected to hold four comma-separated `lat,lon` pairs, one per line;
/// reading either file is the renderer's job, never the core's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapOverlay {
    pub image_path: PathBuf,
    pub bbox_path: PathBuf,
}

impl MapOverlay {
    pub fn new(image_path: impl Into<PathBuf>, bbox_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            bbox_path: bbox_path.into(),
        }
    }
}
