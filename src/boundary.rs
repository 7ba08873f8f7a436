//! Boundary fragment reconciliation (spec §4.5).
//!
//! After every worker joins, each adjacent pair `(trailing_w, leading_{w+1})`
//! reconstructs exactly one line the two workers' ranges split between them.
//! This module concatenates every such pair, separated by `'\n'` between
//! *different* pairs, and re-parses the result as ordinary lines through a
//! fresh [`Aggregator`] backed by the main arena — producing the `(W+1)`-th
//! partial result that [`crate::merge`] folds in alongside the `W` worker
//! partials.

use crate::aggregator::Aggregator;
use crate::arena::{Arena, ArenaSliceInit};
use crate::chunk_reader::{Overflow, PartialResult};
use crate::parser::parse_line;

/// Stitches `overflows` back into whole lines and aggregates them.
///
/// `overflows` holds `2 * workers - 2` slots: for worker `w`, slot
/// `2w - 1` is its leading fragment (absent for `w == 0`) and slot `2w` is
/// its trailing fragment (absent for the last worker). Slots are visited in
/// pairs `(2w, 2w+1)` — worker `w`'s trailing fragment followed by worker
/// `w+1`'s leading fragment — which is exactly the adjacent-worker pairing
/// spec §3 describes.
pub fn reconcile(overflows: &ArenaSliceInit<Overflow>, arena: &Arena) -> PartialResult {
    let mut buffer: Vec<u8> = Vec::new();
    let slots = overflows.as_slice();

    let mut i = 0;
    while i + 1 < slots.len() {
        if let Some(trailing) = slots[i] {
            buffer.extend_from_slice(trailing);
        }
        if let Some(leading) = slots[i + 1] {
            buffer.extend_from_slice(leading);
        }
        buffer.push(b'\n');
        i += 2;
    }

    let mut aggregator = Aggregator::new(arena);
    for line in buffer.split(|&b| b == b'\n') {
        if let Some(parsed) = parse_line(line) {
            aggregator.record(parsed.name, parsed.temp_tenths);
        }
    }

    aggregator.into_sorted()
}
