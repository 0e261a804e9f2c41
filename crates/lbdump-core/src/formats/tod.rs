//! TOD animation streams: a one-byte signature, a short header, then the
//! declared run of frames.

use std::io::{Read, Seek};

use super::frame::decode_frame;
use super::{DecodeError, layout};
use crate::report::ReportSink;
use crate::source::Cursor;

/// Decoded TOD header plus packet tallies aggregated across all frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tod {
    pub version: u8,
    /// Tick resolution for frame timing.
    pub resolution: u16,
    pub frame_count: u32,
    pub packets_total: u64,
    pub packet_kinds: [u64; 16],
}

pub fn decode_tod<R: Read + Seek>(
    cursor: &mut Cursor<R>,
    sink: &mut dyn ReportSink,
) -> Result<Tod, DecodeError> {
    let magic = cursor.read_u8()?;
    if magic != layout::TOD_MAGIC {
        return Err(DecodeError::SignatureMismatch {
            layer: "TOD",
            expected: u32::from(layout::TOD_MAGIC),
            found: u32::from(magic),
        });
    }
    sink.heading("TOD");

    let version = cursor.read_u8()?;
    let resolution = cursor.read_u16()?;
    let frame_count = cursor.read_u32()?;
    sink.line(format_args!("Version: {version}"));
    sink.line(format_args!("Resolution: {resolution} ticks"));
    sink.line(format_args!("Frame count: {frame_count}"));

    let mut packets_total = 0u64;
    let mut packet_kinds = [0u64; 16];
    for _ in 0..frame_count {
        let frame = decode_frame(cursor, sink)?;
        packets_total += u64::from(frame.packet_count);
        for (total, seen) in packet_kinds.iter_mut().zip(frame.packet_kinds) {
            *total += seen;
        }
    }

    Ok(Tod {
        version,
        resolution,
        frame_count,
        packets_total,
        packet_kinds,
    })
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::report::RecordedReport;

    fn cursor_over(bytes: Vec<u8>) -> Cursor<io::Cursor<Vec<u8>>> {
        Cursor::new(io::Cursor::new(bytes)).unwrap()
    }

    fn tod_header(version: u8, resolution: u16, frame_count: u32) -> Vec<u8> {
        let mut bytes = vec![layout::TOD_MAGIC, version];
        bytes.extend_from_slice(&resolution.to_le_bytes());
        bytes.extend_from_slice(&frame_count.to_le_bytes());
        bytes
    }

    #[test]
    fn wrong_signature_byte_names_the_layer() {
        let mut cursor = cursor_over(vec![0x51, 0, 0, 0, 0, 0, 0, 0]);
        let mut sink = RecordedReport::default();
        let err = decode_tod(&mut cursor, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SignatureMismatch {
                layer: "TOD",
                expected: 0x50,
                found: 0x51,
            }
        ));
        assert!(sink.entries.is_empty());
    }

    #[test]
    fn empty_stream_decodes_without_touching_frames() {
        let mut cursor = cursor_over(tod_header(1, 10, 0));
        let mut sink = RecordedReport::default();
        let tod = decode_tod(&mut cursor, &mut sink).unwrap();
        assert_eq!(tod.version, 1);
        assert_eq!(tod.resolution, 10);
        assert_eq!(tod.frame_count, 0);
        assert_eq!(tod.packets_total, 0);
        assert_eq!(
            sink.entries,
            vec!["== TOD", "Version: 1", "Resolution: 10 ticks", "Frame count: 0"]
        );
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn tallies_accumulate_across_frames() {
        let mut bytes = tod_header(2, 60, 2);
        // frame 0 with one kind-5 packet
        bytes.extend_from_slice(&[0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(&[0x01, 0x00, 0x05, 0x01]);
        // frame 1 with one kind-5 and one kind-12 packet
        bytes.extend_from_slice(&[0x04, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(&[0x02, 0x00, 0x05, 0x01]);
        bytes.extend_from_slice(&[0x03, 0x00, 0x0C, 0x01]);
        let mut cursor = cursor_over(bytes);
        let mut sink = RecordedReport::default();
        let tod = decode_tod(&mut cursor, &mut sink).unwrap();
        assert_eq!(tod.frame_count, 2);
        assert_eq!(tod.packets_total, 3);
        assert_eq!(tod.packet_kinds[5], 2);
        assert_eq!(tod.packet_kinds[12], 1);
    }
}
