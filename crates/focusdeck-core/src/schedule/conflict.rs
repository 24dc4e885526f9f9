//! Schedule overlap detection.
//!
//! Two blocks conflict iff `a.start < b.end && b.start < a.end`. Blocks that
//! merely touch (one ends when the other starts) do not conflict, and a block
//! never conflicts with itself. Blocks with `start >= end` are ignored.

use std::collections::BTreeSet;

use super::ScheduleBlock;

/// Half-open interval intersection.
pub fn overlaps(a: &ScheduleBlock, b: &ScheduleBlock) -> bool {
    a.start < b.end && b.start < a.end
}

/// Ids of blocks overlapping at least one other block.
///
/// Sweeps blocks in start order while tracking the block with the latest end
/// seen so far. A block starting before that end overlaps it, so both are
/// flagged. O(n log n).
pub fn conflicting_ids(blocks: &[ScheduleBlock]) -> BTreeSet<String> {
    let mut order: Vec<&ScheduleBlock> = blocks.iter().filter(|b| b.is_valid()).collect();
    order.sort_by_key(|b| (b.start, b.end));

    let mut conflicts = BTreeSet::new();
    let mut reach: Option<&ScheduleBlock> = None;
    for block in order {
        match reach {
            Some(holder) if block.start < holder.end => {
                conflicts.insert(holder.id.clone());
                conflicts.insert(block.id.clone());
                // The earliest block among those sharing the latest end stays
                // the holder.
                if block.end > holder.end {
                    reach = Some(block);
                }
            }
            _ => reach = Some(block),
        }
    }
    conflicts
}

/// Pairwise O(n^2) reference for [`conflicting_ids`].
pub fn conflicting_ids_pairwise(blocks: &[ScheduleBlock]) -> BTreeSet<String> {
    let valid: Vec<&ScheduleBlock> = blocks.iter().filter(|b| b.is_valid()).collect();
    let mut conflicts = BTreeSet::new();
    for (i, a) in valid.iter().enumerate() {
        for b in &valid[i + 1..] {
            if overlaps(a, b) {
                conflicts.insert(a.id.clone());
                conflicts.insert(b.id.clone());
            }
        }
    }
    conflicts
}
