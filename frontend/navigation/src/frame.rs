use common::tag::TagObservation;

/// Everything the navigator gets to see for one tick
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub tags: Vec<TagObservation>,
    /// Monotonic, milliseconds
    pub timestamp_ms: u64,
    /// Pixels
    pub frame_width: u32,
}

impl FrameSnapshot {
    pub fn new(tags: Vec<TagObservation>, timestamp_ms: u64, frame_width: u32) -> Self {
        FrameSnapshot {
            tags,
            timestamp_ms,
            frame_width,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
