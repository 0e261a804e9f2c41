//! MOM blocks: the model-object wrapper between LMM and MOS.

use std::io::{Read, Seek};

use super::mos::{Mos, decode_mos};
use super::{DecodeError, layout};
use crate::report::ReportSink;
use crate::source::Cursor;

/// Decoded MOM header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mom {
    /// Declared block length in bytes. Reported only.
    pub length_bytes: u32,
    /// Offset of the embedded TMD model data. Reported only; TMD payloads
    /// are outside the scope of this decoder.
    pub tmd_offset: u32,
    pub mos: Mos,
}

pub fn decode_mom<R: Read + Seek>(
    cursor: &mut Cursor<R>,
    sink: &mut dyn ReportSink,
) -> Result<Mom, DecodeError> {
    let magic = cursor.read_i32()?;
    if magic != layout::MOM_MAGIC {
        return Err(DecodeError::SignatureMismatch {
            layer: "MOM",
            expected: layout::MOM_MAGIC as u32,
            found: magic as u32,
        });
    }
    sink.heading("MOM");

    let length_bytes = cursor.read_u32()?;
    let tmd_offset = cursor.read_u32()?;
    sink.line(format_args!("MOM length: {length_bytes} bytes"));
    sink.line(format_args!("TMD offset: {tmd_offset:#X}"));

    let mos = decode_mos(cursor, sink)?;
    Ok(Mom {
        length_bytes,
        tmd_offset,
        mos,
    })
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::report::RecordedReport;

    #[test]
    fn header_fields_are_reported_before_the_mos_block() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&layout::MOM_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&32u32.to_le_bytes());
        bytes.extend_from_slice(&0x800u32.to_le_bytes());
        bytes.extend_from_slice(&layout::MOS_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&12u32.to_le_bytes());
        bytes.push(layout::TOD_MAGIC);
        bytes.push(1);
        bytes.extend_from_slice(&10u16.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());

        let mut cursor = Cursor::new(io::Cursor::new(bytes)).unwrap();
        let mut sink = RecordedReport::default();
        let mom = decode_mom(&mut cursor, &mut sink).unwrap();
        assert_eq!(mom.length_bytes, 32);
        assert_eq!(mom.tmd_offset, 0x800);
        assert_eq!(
            &sink.entries[..3],
            ["== MOM", "MOM length: 32 bytes", "TMD offset: 0x800"]
        );
        assert_eq!(sink.entries[3], "== MOS");
    }

    #[test]
    fn wrong_signature_names_the_layer() {
        let mut cursor = Cursor::new(io::Cursor::new(vec![0; 12])).unwrap();
        let mut sink = RecordedReport::default();
        let err = decode_mom(&mut cursor, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SignatureMismatch {
                layer: "MOM",
                found: 0,
                ..
            }
        ));
    }
}
