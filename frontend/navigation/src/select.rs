use common::tag::TagObservation;

/// The tag with the smallest image `y`, which with this camera mount is the one
/// farthest down the course. Ties go to the tag reported first.
pub fn farthest(tags: &[TagObservation]) -> Option<&TagObservation> {
    farthest_matching(tags, |_| true)
}

/// First tag carrying the turn marker id
pub fn turn_marker(tags: &[TagObservation], turn_tag_id: u32) -> Option<&TagObservation> {
    tags.iter().find(|tag| tag.id == turn_tag_id)
}

pub fn any_turn_marker(tags: &[TagObservation], turn_tag_id: u32) -> bool {
    turn_marker(tags, turn_tag_id).is_some()
}

/// Like [`farthest`] but ignores turn markers
pub fn farthest_excluding_turn(tags: &[TagObservation], turn_tag_id: u32) -> Option<&TagObservation> {
    farthest_matching(tags, |tag| tag.id != turn_tag_id)
}

fn farthest_matching<F: Fn(&TagObservation) -> bool>(tags: &[TagObservation], predicate: F) -> Option<&TagObservation> {
    let mut farthest: Option<&TagObservation> = None;

    for tag in tags.iter().filter(|tag| predicate(tag)) {
        if farthest.map_or(true, |best| tag.center.y < best.center.y) {
            farthest = Some(tag);
        }
    }

    farthest
}
