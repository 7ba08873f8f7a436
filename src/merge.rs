//! Pairwise merge of sorted partials (spec §4.6).
//!
//! Ported from `mergeSortMulti`/`mergeMulti`/`mergeSort`/`merge` in the
//! original: partials are merged two at a time, recursively halving the
//! work list, with each pairwise merge running on its own OS thread via
//! `std::thread::scope` while the list is long enough to make that worth the
//! overhead. Below [`PARALLEL_THRESHOLD`] pairs, merging runs inline —
//! spawning a thread per leaf merge once the list is down to a handful of
//! entries costs more than it saves.

use crate::aggregator::StationAcc;
use crate::arena::ArenaRef;
use crate::chunk_reader::PartialResult;

/// Below this many partials, merge sequentially rather than forking more
/// scoped threads (mirrors the original's leaf-level fallback to a plain
/// loop once the recursion bottoms out).
const PARALLEL_THRESHOLD: usize = 4;

/// Merges all `partials` (each already sorted by name) into one
/// sorted, de-duplicated result — entries sharing a name are folded with
/// [`StationAcc::fold_into`].
pub fn merge_all(partials: Vec<PartialResult>) -> PartialResult {
    merge_sort_multi(partials)
}

fn merge_sort_multi(mut partials: Vec<PartialResult>) -> PartialResult {
    if partials.is_empty() {
        return Vec::new();
    }
    if partials.len() == 1 {
        return partials.pop().expect("len == 1");
    }

    if partials.len() >= PARALLEL_THRESHOLD {
        let right = partials.split_off(partials.len() / 2);
        let left = partials;

        let (left_merged, right_merged) = std::thread::scope(|scope| {
            let right_handle = scope.spawn(|| merge_sort_multi(right));
            let left_merged = merge_sort_multi(left);
            let right_merged = right_handle.join().expect("merge thread panicked");
            (left_merged, right_merged)
        });

        merge_pair(left_merged, right_merged)
    } else {
        let mut iter = partials.into_iter();
        let mut acc = iter.next().expect("non-empty");
        for next in iter {
            acc = merge_pair(acc, next);
        }
        acc
    }
}

/// Merges two sorted partials into one, folding accumulators for names
/// that appear in both (spec §4.6: "fold `b[j]` into `a[i]`").
fn merge_pair(a: PartialResult, b: PartialResult) -> PartialResult {
    let mut out: Vec<ArenaRef<StationAcc>> = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].name.cmp(b[j].name) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                let mut folded = a[i];
                folded.fold_into(&b[j]);
                out.push(folded);
                i += 1;
                j += 1;
            }
        }
    }

    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}
