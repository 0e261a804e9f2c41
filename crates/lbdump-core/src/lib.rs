//! Core decoding library for LBD level archives.
//!
//! The crate implements the offline scan pipeline behind the `lbdump` CLI:
//! a byte source feeds the layered decode chain (LBD, then LMM, MOM, MOS,
//! TOD, frames and packets), which streams findings to a report sink and
//! aggregates a deterministic [`Summary`] for machine consumption. All file
//! I/O lives in `source`; wire constants live in `formats::layout` so the
//! layer decoders stay small.
//!
//! Invariants:
//! - Every layer validates its signature before reading anything else and
//!   fails fast on mismatch; failures propagate to the caller unchanged.
//! - The shared cursor moves strictly forward, except for the single
//!   absolute seek the file header defines (the LMM offset).
//! - Report line order matches stream order and is stable across runs; the
//!   summary never depends on wall-clock state outside `generated_at`.
//!
//! Version française (résumé) :
//! Cette crate fournit le décodage en couches des archives LBD : une source
//! d'octets alimente la chaîne de décodeurs, qui émet un rapport texte et un
//! résumé JSON déterministe. Les entrées/sorties restent dans `source`, les
//! constantes de format dans `formats::layout`. Chaque couche valide sa
//! signature avant toute lecture et les erreurs remontent inchangées.
//!
//! # Examples
//! ```
//! use std::io;
//! use std::path::Path;
//!
//! use lbdump_core::report::NullReport;
//! use lbdump_core::{fixtures, scan_source};
//!
//! let image = fixtures::empty_tod();
//! let summary = scan_source(Path::new("demo.lbd"), io::Cursor::new(image), &mut NullReport)?;
//! assert_eq!(summary.tod.frame_count, 0);
//! assert_eq!(summary.input.bytes, 62);
//! # Ok::<(), lbdump_core::ScanError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod fixtures;
mod formats;
pub mod report;
mod scan;
mod source;

pub use formats::DecodeError;
pub use scan::{ScanError, scan_lbd_file, scan_source};
pub use source::{Cursor, SourceError};

/// Version of the summary schema emitted by this crate.
pub const SUMMARY_VERSION: u32 = 1;

/// Timestamp used when RFC 3339 formatting of the current time fails.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Aggregated result of scanning one LBD file.
///
/// Field order is declaration order in the serialized form, and every
/// collection is emitted in a deterministic order, so two scans of the same
/// file differ only in `generated_at`.
///
/// # Examples
/// ```
/// use lbdump_core::make_stub_summary;
///
/// let summary = make_stub_summary("M000.lbd", 62);
/// assert_eq!(summary.summary_version, lbdump_core::SUMMARY_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Schema version of this summary, not the container version byte.
    pub summary_version: u32,
    pub tool: ToolInfo,
    /// RFC 3339 timestamp of when the summary was generated.
    pub generated_at: String,
    pub input: InputInfo,
    pub lbd: LbdSummary,
    pub lmm: LmmSummary,
    pub mom: MomSummary,
    pub mos: MosSummary,
    pub tod: TodSummary,
}

/// Identity of the generating tool.
///
/// # Examples
/// ```
/// use lbdump_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "lbdump".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "lbdump");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// The scanned input as seen on disk.
///
/// # Examples
/// ```
/// use lbdump_core::InputInfo;
///
/// let input = InputInfo {
///     path: "STG00/M000.LBD".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    pub path: String,
    pub bytes: u64,
}

/// LBD file header fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LbdSummary {
    pub lmm_offset: u16,
}

/// LMM block header fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LmmSummary {
    pub mom_count: u32,
    pub mom_offset: u32,
}

/// MOM block header fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomSummary {
    pub length_bytes: u32,
    pub tmd_offset: u32,
}

/// MOS block header fields. The length field only exists in files that
/// declare more than one TOD, so it is omitted from JSON when absent.
///
/// # Examples
/// ```
/// use lbdump_core::MosSummary;
///
/// let mos = MosSummary {
///     tod_count: 1,
///     tod_offset: 12,
///     tod_length_bytes: None,
/// };
/// let json = serde_json::to_string(&mos).unwrap();
/// assert!(!json.contains("tod_length_bytes"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosSummary {
    pub tod_count: u32,
    pub tod_offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tod_length_bytes: Option<u32>,
}

/// TOD stream header fields plus packet tallies across all frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodSummary {
    pub version: u8,
    pub resolution_ticks: u16,
    pub frame_count: u32,
    pub packets_total: u64,
    /// Labelled packet counts, ascending by kind value, empty slots left
    /// out.
    pub packet_kinds: Vec<PacketKindCount>,
}

/// Count of packets sharing one kind label.
///
/// # Examples
/// ```
/// use lbdump_core::PacketKindCount;
///
/// let entry = PacketKindCount {
///     kind: "attribute".to_string(),
///     count: 3,
/// };
/// assert_eq!(entry.count, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacketKindCount {
    pub kind: String,
    pub count: u64,
}

/// Build a fixed, deterministic summary for documentation examples and
/// tests that only need the shape.
pub fn make_stub_summary(path: &str, bytes: u64) -> Summary {
    Summary {
        summary_version: SUMMARY_VERSION,
        tool: ToolInfo {
            name: "lbdump".to_string(),
            version: "0.0.0".to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: path.to_string(),
            bytes,
        },
        lbd: LbdSummary { lmm_offset: 0 },
        lmm: LmmSummary {
            mom_count: 0,
            mom_offset: 0,
        },
        mom: MomSummary {
            length_bytes: 0,
            tmd_offset: 0,
        },
        mos: MosSummary {
            tod_count: 0,
            tod_offset: 0,
            tod_length_bytes: None,
        },
        tod: TodSummary {
            version: 0,
            resolution_ticks: 0,
            frame_count: 0,
            packets_total: 0,
            packet_kinds: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_omits_the_tod_length_when_absent() {
        let summary = make_stub_summary("stub.lbd", 0);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("tod_length_bytes"));

        let mut with_length = make_stub_summary("stub.lbd", 0);
        with_length.mos.tod_length_bytes = Some(16);
        let json = serde_json::to_string(&with_length).unwrap();
        assert!(json.contains("\"tod_length_bytes\":16"));
    }

    #[test]
    fn summary_round_trips_through_json() {
        let mut summary = make_stub_summary("stub.lbd", 0);
        summary.tod.packet_kinds.push(PacketKindCount {
            kind: "attribute".to_string(),
            count: 3,
        });
        let json = serde_json::to_string(&summary).unwrap();
        let back: Summary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary_version, SUMMARY_VERSION);
        assert_eq!(back.mos.tod_length_bytes, None);
        assert_eq!(back.tod.packet_kinds.len(), 1);
        assert_eq!(back.tod.packet_kinds[0].kind, "attribute");
        assert_eq!(back.tod.packet_kinds[0].count, 3);
    }
}
