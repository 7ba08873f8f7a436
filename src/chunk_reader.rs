//! Per-worker byte-range file reader (spec §4.4).
//!
//! Each worker opens the input file independently — "to avoid sharing a
//! seek cursor" (spec §5) — seeks to its `from` offset, and reads fixed-size
//! buffers until it has consumed `to - from` bytes. The first buffer of a
//! non-zero worker and the last buffer of a non-final worker each straddle a
//! line the adjacent worker owns the other half of; those halves are copied
//! into the shared `overflows` slots for the [`crate::boundary`] reconciler
//! to stitch back together after the join barrier.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::aggregator::{Aggregator, StationAcc};
use crate::arena::{Arena, ArenaRef, ArenaSliceInit};
use crate::error::{Error, Result};
use crate::parser::parse_line;

/// 4 MiB, matching the original's `BUFFER_SIZE`.
pub const BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// `K` in `W = NumCPU * K` (spec §4.4).
pub const WORKERS_MULTIPLIER: usize = 20;

/// One worker's locally aggregated, sorted result.
pub type PartialResult = Vec<ArenaRef<StationAcc>>;

/// A boundary fragment slot: `None` until the owning worker writes it.
pub type Overflow = Option<&'static [u8]>;

/// Computes the worker count and per-worker chunk size for a file of
/// `file_size` bytes (spec §4.4's partitioning policy).
pub fn partition(file_size: u64, cpu_count: usize) -> (usize, u64) {
    let mut workers = cpu_count * WORKERS_MULTIPLIER;
    if file_size < BUFFER_SIZE as u64 {
        workers = 1;
    }

    let chunk_size = if workers > 1 { file_size / (workers as u64 - 1) } else { file_size };

    (workers, chunk_size)
}

/// Computes worker `worker_id`'s half-open byte range `[from, to)` given a
/// per-worker `chunk_size`, clamped to `file_size` (the last worker's range
/// may be shorter than `chunk_size`).
pub fn worker_range(worker_id: usize, chunk_size: u64, file_size: u64) -> (u64, u64) {
    let from = chunk_size * worker_id as u64;
    let to = (from + chunk_size).min(file_size);
    (from, to)
}

/// Processes byte range `[from, to)` of `path` for one worker, writing its
/// boundary fragments into `overflows[2*worker_id - 1]` (leading) and
/// `overflows[2*worker_id]` (trailing) as applicable, and returning its
/// sorted partial result.
pub fn process_worker_range(
    path: &Path,
    from: u64,
    to: u64,
    worker_id: usize,
    worker_count: usize,
    arena: &Arena,
    overflows: &ArenaSliceInit<Overflow>,
) -> Result<PartialResult> {
    if from == to {
        return Ok(Vec::new());
    }

    let mut file = File::open(path).map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
    file.seek(SeekFrom::Start(from)).map_err(|source| Error::Read { path: path.to_path_buf(), source })?;

    let total = (to - from) as usize;
    let mut buf = vec![0u8; BUFFER_SIZE];
    let mut leftover: Vec<u8> = Vec::with_capacity(128);
    let mut aggregator = Aggregator::new(arena);

    let mut consumed = 0usize;
    while consumed < total {
        let to_read = (total - consumed).min(BUFFER_SIZE);
        let fbuf = &mut buf[..to_read];
        file.read_exact(fbuf).map_err(|source| Error::Read { path: path.to_path_buf(), source })?;

        let is_first_iteration = consumed == 0;
        let is_last_iteration = consumed + to_read == total;
        consumed += to_read;

        let first_line_index = memchr::memchr(b'\n', fbuf)
            .expect("process_worker_range: buffer must contain a newline for conformant input");

        if worker_id != 0 && is_first_iteration {
            let fragment = arena.alloc_bytes(&fbuf[..first_line_index]);
            overflows.set(worker_id * 2 - 1, Some(fragment));
        } else {
            leftover.extend_from_slice(&fbuf[..first_line_index]);
            if let Some(parsed) = parse_line(&leftover) {
                aggregator.record(parsed.name, parsed.temp_tenths);
            }
            leftover.clear();
        }

        let last_line_index = memchr::memrchr(b'\n', fbuf)
            .expect("process_worker_range: buffer must contain a newline for conformant input");

        if worker_id != worker_count - 1 && is_last_iteration {
            let fragment = arena.alloc_bytes(&fbuf[last_line_index + 1..]);
            overflows.set(worker_id * 2, Some(fragment));
        } else {
            leftover.extend_from_slice(&fbuf[last_line_index + 1..]);
        }

        for line in fbuf[first_line_index + 1..=last_line_index].split(|&b| b == b'\n') {
            if let Some(parsed) = parse_line(line) {
                aggregator.record(parsed.name, parsed.temp_tenths);
            }
        }
    }

    Ok(aggregator.into_sorted())
}
