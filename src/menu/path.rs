/// Index of a child within its parent. The width of this type bounds how many
/// children a single node may hold.
pub type PathIndex = u16;

/// Largest number of children a node accepts.
pub const MAX_CHILDREN: usize = PathIndex::MAX as usize;

/// Splits two paths at their longest shared prefix.
///
/// Returns `(common, remainder)` where `common` is the shared prefix and
/// `remainder` is what is left of `to` after it. Both slices borrow from `to`.
pub fn common_ancestor<'a>(
    from: &[PathIndex],
    to: &'a [PathIndex],
) -> (&'a [PathIndex], &'a [PathIndex]) {
    let shared = from
        .iter()
        .zip(to)
        .take_while(|(a, b)| a == b)
        .count();
    to.split_at(shared)
}

/// Renders a path as its indices joined by `-`, e.g. `2-0-1`.
///
/// Diagnostics only; nothing parses this form back.
pub fn path_string(path: &[PathIndex]) -> String {
    path.iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("-")
}
