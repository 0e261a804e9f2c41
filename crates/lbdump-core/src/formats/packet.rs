//! Animation packets, the innermost unit of a TOD stream.

use std::borrow::Cow;
use std::io::{Read, Seek};

use super::{DecodeError, layout};
use crate::report::ReportSink;
use crate::source::Cursor;

/// One decoded packet prefix. The payload is skipped, not decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub object_id: u16,
    /// 4-bit kind from the low nibble of the kind/flag byte.
    pub kind: u8,
    /// 4-bit flag from the high nibble of the kind/flag byte.
    pub flag: u8,
    /// Declared packet length in words, prefix included.
    pub length_words: u8,
}

/// Human-readable label for a 4-bit packet kind: a table entry for known
/// kinds, 4-digit binary text for the rest.
pub fn kind_label(kind: u8) -> Cow<'static, str> {
    match layout::PACKET_KIND_LABELS.get(kind as usize) {
        Some(label) => Cow::Borrowed(label),
        None => Cow::Owned(format!("{kind:04b}")),
    }
}

/// Decode one packet at the cursor: report its kind and declared length,
/// then skip the payload so the cursor lands on the next packet.
pub fn decode_packet<R: Read + Seek>(
    cursor: &mut Cursor<R>,
    sink: &mut dyn ReportSink,
) -> Result<Packet, DecodeError> {
    let object_id = cursor.read_u16()?;
    let kind_flag = cursor.read_u8()?;
    let packet = Packet {
        object_id,
        kind: kind_flag & 0x0F,
        flag: kind_flag >> 4,
        length_words: cursor.read_u8()?,
    };
    if packet.length_words == 0 {
        return Err(DecodeError::ZeroPacketLength { object_id });
    }

    sink.line(format_args!("{}", kind_label(packet.kind)));
    sink.line(format_args!("Packet length: {} words", packet.length_words));

    // the four-byte prefix is already consumed
    let payload = u64::from(packet.length_words) * layout::WORD_SIZE - layout::PACKET_HEADER_LEN;
    cursor.skip(payload)?;
    Ok(packet)
}
