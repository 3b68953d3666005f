use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// One fiducial tag as reported by the detector for a single frame
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TagObservation {
    pub id: u32,
    /// Image space, pixels. `y` grows downwards so a smaller `y` is farther away
    pub center: DVec2,
    pub corners: [DVec2; 4],
    /// Camera frame, meters
    pub pose_translation: DVec3,
}

impl TagObservation {
    pub fn new(id: u32, center: DVec2, corners: [DVec2; 4], pose_translation: DVec3) -> Self {
        TagObservation {
            id,
            center,
            corners,
            pose_translation,
        }
    }

    /// Straight line distance from the camera
    pub fn distance(&self) -> f64 {
        self.pose_translation.length()
    }
}
