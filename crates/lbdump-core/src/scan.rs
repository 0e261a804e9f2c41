//! Scan driver: opens a byte source, runs the decode chain against a
//! report sink, and assembles the JSON-facing summary.

use std::io::{Read, Seek};
use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::formats::packet::kind_label;
use crate::formats::{DecodeError, Lbd, decode_lbd};
use crate::report::ReportSink;
use crate::source::{self, Cursor, SourceError};
use crate::{
    DEFAULT_GENERATED_AT, InputInfo, LbdSummary, LmmSummary, MomSummary, MosSummary,
    PacketKindCount, SUMMARY_VERSION, Summary, TodSummary, ToolInfo,
};

/// Errors surfaced by a whole-file scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Scan an LBD file from disk, streaming the report to `sink`.
pub fn scan_lbd_file(path: &Path, sink: &mut dyn ReportSink) -> Result<Summary, ScanError> {
    let cursor = source::open(path)?;
    scan_cursor(path, cursor, sink)
}

/// Scan an LBD image from any seekable byte source. `path` is only used
/// for summary metadata, so in-memory sources can pass a synthetic name.
pub fn scan_source<R: Read + Seek>(
    path: &Path,
    reader: R,
    sink: &mut dyn ReportSink,
) -> Result<Summary, ScanError> {
    let cursor = Cursor::new(reader)?;
    scan_cursor(path, cursor, sink)
}

fn scan_cursor<R: Read + Seek>(
    path: &Path,
    mut cursor: Cursor<R>,
    sink: &mut dyn ReportSink,
) -> Result<Summary, ScanError> {
    let bytes = cursor.len();
    let lbd = decode_lbd(&mut cursor, sink)?;
    Ok(build_summary(path, bytes, &lbd))
}

fn build_summary(path: &Path, bytes: u64, lbd: &Lbd) -> Summary {
    let lmm = &lbd.lmm;
    let mom = &lmm.mom;
    let mos = &mom.mos;
    let tod = &mos.tod;
    Summary {
        summary_version: SUMMARY_VERSION,
        tool: ToolInfo {
            name: "lbdump".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: now_rfc3339(),
        input: InputInfo {
            path: path.display().to_string(),
            bytes,
        },
        lbd: LbdSummary {
            lmm_offset: lbd.lmm_offset,
        },
        lmm: LmmSummary {
            mom_count: lmm.mom_count,
            mom_offset: lmm.mom_offset,
        },
        mom: MomSummary {
            length_bytes: mom.length_bytes,
            tmd_offset: mom.tmd_offset,
        },
        mos: MosSummary {
            tod_count: mos.tod_count,
            tod_offset: mos.tod_offset,
            tod_length_bytes: mos.tod_length,
        },
        tod: TodSummary {
            version: tod.version,
            resolution_ticks: tod.resolution,
            frame_count: tod.frame_count,
            packets_total: tod.packets_total,
            packet_kinds: kind_counts(&tod.packet_kinds),
        },
    }
}

/// Collapse the per-kind tally array into labelled counts, ascending by
/// kind value and omitting kinds that never occurred.
fn kind_counts(kinds: &[u64; 16]) -> Vec<PacketKindCount> {
    kinds
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(kind, count)| PacketKindCount {
            kind: kind_label(kind as u8).into_owned(),
            count: *count,
        })
        .collect()
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| DEFAULT_GENERATED_AT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_counts_skip_empty_slots_and_keep_kind_order() {
        let mut kinds = [0u64; 16];
        kinds[8] = 2;
        kinds[0] = 1;
        kinds[12] = 5;
        let counts = kind_counts(&kinds);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[0].kind, "attribute");
        assert_eq!(counts[0].count, 1);
        assert_eq!(counts[1].kind, "Object control");
        assert_eq!(counts[2].kind, "1100");
        assert_eq!(counts[2].count, 5);
    }

    #[test]
    fn timestamps_are_rfc3339() {
        let stamp = now_rfc3339();
        // 2026-08-23T12:34:56.789Z and friends
        assert_eq!(stamp.as_bytes()[4], b'-');
        assert_eq!(stamp.as_bytes()[10], b'T');
        assert!(stamp.ends_with('Z') || stamp.contains('+'));
    }
}
