//! MOS blocks: the model-object set wrapping a TOD stream.

use std::io::{Read, Seek};

use super::tod::{Tod, decode_tod};
use super::{DecodeError, layout};
use crate::report::ReportSink;
use crate::source::Cursor;

/// Decoded MOS header. `tod_length` exists in the stream only when more
/// than one TOD is declared, so a single-TOD file has no length to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mos {
    pub tod_count: u32,
    pub tod_offset: u32,
    pub tod_length: Option<u32>,
    pub tod: Tod,
}

pub fn decode_mos<R: Read + Seek>(
    cursor: &mut Cursor<R>,
    sink: &mut dyn ReportSink,
) -> Result<Mos, DecodeError> {
    let magic = cursor.read_i32()?;
    if magic != layout::MOS_MAGIC {
        return Err(DecodeError::SignatureMismatch {
            layer: "MOS",
            expected: layout::MOS_MAGIC as u32,
            found: magic as u32,
        });
    }
    sink.heading("MOS");

    let tod_count = cursor.read_u32()?;
    let tod_offset = cursor.read_u32()?;
    let tod_length = if tod_count > 1 {
        Some(cursor.read_u32()?)
    } else {
        None
    };
    sink.line(format_args!("Num TODs: {tod_count}"));
    sink.line(format_args!("TOD offset: {tod_offset:#X}"));
    match tod_length {
        Some(length) => sink.line(format_args!("TOD length: {length} bytes")),
        None => sink.line(format_args!("TOD length: N/A")),
    }

    // the offset field is informational; decoding continues in place
    let tod = decode_tod(cursor, sink)?;
    Ok(Mos {
        tod_count,
        tod_offset,
        tod_length,
        tod,
    })
}
