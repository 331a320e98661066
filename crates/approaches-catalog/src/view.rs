use crate::filter::{filter_approaches, FilterState};
use crate::model::ApproachRecord;
use crate::sort::sort_approaches;

/// Filter the full catalog by `state`, then order the survivors by
/// `state.sort_key`.
pub fn compute_view<'a>(
    approaches: &'a [ApproachRecord],
    state: &FilterState,
) -> Vec<&'a ApproachRecord> {
    let mut view = filter_approaches(approaches, state);
    sort_approaches(&mut view, state.sort_key);
    view
}
