use common::tag::TagObservation;

/// Linear map of `val` from `[in_min, in_max]` onto `[out_min, out_max]`.
/// Values outside the input range extrapolate.
pub fn rescale(val: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (val - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Forward power from how far away the tag is
pub fn forward_power(tag: &TagObservation, max_power: u8) -> i32 {
    rescale(tag.distance(), 0.0, common::MAX_TAG_DISTANCE_M, 0.0, max_power as f64) as i32
}

/// Turning power from how far the tag sits off the middle of the frame.
/// Positive when the tag is left of center, which turns the rover left.
pub fn turning_power(tag: &TagObservation, frame_width: u32, max_power: u8) -> i32 {
    let half_width = frame_width as f64 / 2.0;
    let max_power = max_power as f64;
    let offset = (frame_width / 2) as f64 - tag.center.x;

    rescale(offset, -half_width, half_width, -max_power, max_power) as i32
}

/// Left and right wheel powers that drive the rover towards `tag`.
///
/// Not clamped: a tag further than 3m, or one far off center, produces powers
/// beyond `max_power`. Callers clamp when storing or sending them.
pub fn power_for_tag(tag: &TagObservation, frame_width: u32, max_power: u8) -> (i32, i32) {
    let forward = forward_power(tag, max_power);
    let turning = turning_power(tag, frame_width, max_power);

    (forward - turning, forward + turning)
}

/// Horizontal offset of the tag from the middle of the frame as a percentage of
/// half the frame width, negative left of center
pub fn center_offset_percent(tag: &TagObservation, frame_width: u32) -> f64 {
    let half_width = frame_width as f64 / 2.0;
    rescale(tag.center.x - half_width, -half_width, half_width, -100.0, 100.0)
}
