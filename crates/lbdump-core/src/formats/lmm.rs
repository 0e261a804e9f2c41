//! LMM blocks: the level model set holding MOM entries.

use std::io::{Read, Seek};

use super::mom::{Mom, decode_mom};
use super::{DecodeError, layout};
use crate::report::ReportSink;
use crate::source::Cursor;

/// Decoded LMM header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lmm {
    pub mom_count: u32,
    /// Offset of the first MOM entry. Reported only; the MOM block is
    /// decoded at the cursor position.
    pub mom_offset: u32,
    pub mom: Mom,
}

pub fn decode_lmm<R: Read + Seek>(
    cursor: &mut Cursor<R>,
    sink: &mut dyn ReportSink,
) -> Result<Lmm, DecodeError> {
    let magic = cursor.read_i32()?;
    if magic != layout::LMM_MAGIC {
        return Err(DecodeError::SignatureMismatch {
            layer: "LMM",
            expected: layout::LMM_MAGIC as u32,
            found: magic as u32,
        });
    }
    sink.heading("LMM");

    let mom_count = cursor.read_u32()?;
    let mom_offset = cursor.read_u32()?;
    sink.line(format_args!("Number of MOMs: {mom_count}"));
    sink.line(format_args!("MOM offset: {mom_offset:#X}"));

    let mom = decode_mom(cursor, sink)?;
    Ok(Lmm {
        mom_count,
        mom_offset,
        mom,
    })
}
