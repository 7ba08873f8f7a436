//! Orchestrates the 1BRC pipeline: partition the input file into worker byte
//! ranges, compute each range's partial aggregate on its own thread, stitch
//! the boundary fragments those workers left behind back into whole lines,
//! merge every partial into one sorted result, and write the report.
//!
//! The per-module breakdown: [`arena`] is the bump allocator every hot-path
//! allocation goes through; [`parser`] and [`hasher`] are the per-line
//! primitives; [`aggregator`] is the per-worker hash-and-fold step;
//! [`chunk_reader`] drives one worker's file range; [`boundary`] reconciles
//! the fragments [`chunk_reader`] workers leave at their range edges;
//! [`merge`] combines every worker's (plus the reconciler's) sorted partial;
//! [`report`] renders the final text.

pub mod aggregator;
pub mod arena;
pub mod boundary;
pub mod chunk_reader;
pub mod error;
pub mod hasher;
pub mod merge;
pub mod parser;
pub mod report;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::thread::available_parallelism;

use arena::{Arena, DEFAULT_BYTES_STEP, DEFAULT_OBJECT_STEP, DEFAULT_SLICE_STEP};
use chunk_reader::{partition, process_worker_range, worker_range, Overflow, PartialResult};
use error::{Error, Result};

/// Runs the full pipeline: reads `input`, computes the per-station report,
/// and writes it to `output`. Returns the number of workers the file was
/// split across, for diagnostics.
pub fn run(input: &Path, output: &Path) -> Result<usize> {
    let file_size = input
        .metadata()
        .map_err(|source| Error::Stat { path: input.to_path_buf(), source })?
        .len();

    let cpu_count: usize = available_parallelism().map(Into::into).unwrap_or(1);
    let (workers, chunk_size) = partition(file_size, cpu_count);

    let main_arena = Arena::new(DEFAULT_OBJECT_STEP, DEFAULT_SLICE_STEP, DEFAULT_BYTES_STEP);
    let partial_slots = main_arena.alloc_slice::<PartialResult>(workers).init_default();
    let overflow_count = workers.saturating_sub(1) * 2;
    let overflows = main_arena.alloc_slice::<Overflow>(overflow_count).init_default();

    std::thread::scope(|scope| -> Result<()> {
        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let (from, to) = worker_range(worker_id, chunk_size, file_size);
            let overflows = &overflows;
            handles.push(scope.spawn(move || -> Result<PartialResult> {
                let worker_arena = Arena::new(DEFAULT_OBJECT_STEP, DEFAULT_SLICE_STEP, DEFAULT_BYTES_STEP);
                let result = process_worker_range(input, from, to, worker_id, workers, &worker_arena, overflows)?;
                // Leaking the worker's arena hands its `StationAcc`s and
                // station-name bytes to the main thread for the merge/report
                // phase; each worker's arena is never touched again after
                // this, so this matches the pipeline's "owned-by-arena for
                // the program's duration" convention (see `arena` module docs).
                std::mem::forget(worker_arena);
                Ok(result)
            }));
        }

        for (worker_id, handle) in handles.into_iter().enumerate() {
            let partial = handle.join().expect("worker thread panicked")?;
            partial_slots.set(worker_id, partial);
        }
        Ok(())
    })?;

    let reconciled = boundary::reconcile(&overflows, &main_arena);

    let mut all_partials: Vec<PartialResult> = partial_slots.as_slice().to_vec();
    all_partials.push(reconciled);
    let merged = merge::merge_all(all_partials);

    let out_file = File::create(output).map_err(|source| Error::Create { path: output.to_path_buf(), source })?;
    report::write_report(BufWriter::new(out_file), &merged).map_err(Error::Write)?;

    Ok(workers)
}
