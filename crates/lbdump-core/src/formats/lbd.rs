//! LBD level archives, the outermost container and top of the decode chain.

use std::io::{Read, Seek};

use super::lmm::{Lmm, decode_lmm};
use super::{DecodeError, layout};
use crate::report::ReportSink;
use crate::source::Cursor;

/// Decoded LBD header and everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lbd {
    pub lmm_offset: u16,
    pub lmm: Lmm,
}

/// Decode a whole LBD image: validate the file signature, locate the LMM
/// block via the header offset, and decode the chain below it.
///
/// This is the only place the cursor jumps to an absolute offset; every
/// layer below reads strictly forward.
pub fn decode_lbd<R: Read + Seek>(
    cursor: &mut Cursor<R>,
    sink: &mut dyn ReportSink,
) -> Result<Lbd, DecodeError> {
    let magic = cursor.read_i32()?;
    if magic != layout::LBD_MAGIC {
        return Err(DecodeError::SignatureMismatch {
            layer: "LBD",
            expected: layout::LBD_MAGIC as u32,
            found: magic as u32,
        });
    }
    cursor.skip(layout::LBD_RESERVED_LEN)?;
    let lmm_offset = cursor.read_u16()?;
    sink.heading("LBD");
    sink.line(format_args!("LMM offset: {lmm_offset:#X}"));

    cursor.seek_to(u64::from(lmm_offset))?;
    let lmm = decode_lmm(cursor, sink)?;
    Ok(Lbd { lmm_offset, lmm })
}
