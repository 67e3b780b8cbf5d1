//! Sibling id allocation

/// Identifier of a node, unique among its siblings.
pub type NodeId = u32;

/// Returns the smallest non-negative id not present in `existing`.
///
/// Gaps are reused: `{0, 2}` yields `1`, not `3`.
pub fn allocate_id<I>(existing: I) -> NodeId
where
    I: IntoIterator<Item = NodeId>,
{
    let mut ids: Vec<NodeId> = existing.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    let mut expected: NodeId = 0;
    for id in ids {
        if id != expected {
            break;
        }
        expected += 1;
    }
    expected
}
