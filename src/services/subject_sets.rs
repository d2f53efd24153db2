//! Set algebra over subject id lists.

/// Union of `original` and `additions`, deduplicated, first occurrence wins
/// the position.
pub(crate) fn union_dedup(original: &[i64], additions: &[i64]) -> Vec<i64> {
    let mut merged = Vec::with_capacity(original.len() + additions.len());
    for id in original.iter().chain(additions) {
        if !merged.contains(id) {
            merged.push(*id);
        }
    }
    merged
}

/// One incremental edit: (original ∪ additions) with every id in `removals`
/// dropped afterwards. An id named in both lists ends up removed.
pub(crate) fn apply_edit(original: &[i64], additions: &[i64], removals: &[i64]) -> Vec<i64> {
    let mut merged = union_dedup(original, additions);
    merged.retain(|id| !removals.contains(id));
    merged
}
