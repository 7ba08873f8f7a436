//! Output formatting (spec §4.7).
//!
//! Emits the same brace-delimited report as `create/dummy.go`'s
//! first-entry-has-no-leading-comma loop, just through a `Write`
//! implementor instead of a buffered file handle: entries are separated by
//! `,\n\t`, with no trailing comma after the last one.

use std::io::{self, Write};

use crate::aggregator::StationAcc;
use crate::arena::ArenaRef;

/// Writes `stations` (already sorted by name) as
/// `{\n\t<name1>=<min>/<mean>/<max>,\n\t<name2>=…\n}\n`: entries are
/// separated by `,\n\t`, with no trailing comma after the last one.
pub fn write_report<W: Write>(mut out: W, stations: &[ArenaRef<StationAcc>]) -> io::Result<()> {
    writeln!(out, "{{")?;
    for (index, station) in stations.iter().enumerate() {
        if index > 0 {
            writeln!(out, ",")?;
        }
        write!(
            out,
            "\t{}={:.1}/{:.1}/{:.1}",
            String::from_utf8_lossy(station.name),
            station.min as f64 / 10.0,
            station.mean(),
            station.max as f64 / 10.0,
        )?;
    }
    if !stations.is_empty() {
        writeln!(out)?;
    }
    writeln!(out, "}}")
}
