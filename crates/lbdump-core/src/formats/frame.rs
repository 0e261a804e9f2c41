//! Animation frames: a fixed header followed by a run of packets.

use std::io::{Read, Seek};

use super::DecodeError;
use super::packet::decode_packet;
use crate::report::ReportSink;
use crate::source::Cursor;

/// One decoded frame header plus per-kind packet tallies for the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Declared frame size in words. Reported only; the packet count is
    /// what drives decoding.
    pub size_words: u16,
    pub packet_count: u16,
    pub number: u32,
    /// Packets seen per 4-bit kind value.
    pub packet_kinds: [u64; 16],
}

/// Decode one frame header, then exactly its declared count of packets in
/// stream order.
pub fn decode_frame<R: Read + Seek>(
    cursor: &mut Cursor<R>,
    sink: &mut dyn ReportSink,
) -> Result<Frame, DecodeError> {
    let size_words = cursor.read_u16()?;
    let packet_count = cursor.read_u16()?;
    let number = cursor.read_u32()?;

    sink.line(format_args!("Frame {number}"));
    sink.line(format_args!("Packet count: {packet_count}"));
    sink.line(format_args!("Frame length: {size_words} words"));

    let mut packet_kinds = [0u64; 16];
    for _ in 0..packet_count {
        let packet = decode_packet(cursor, sink)?;
        packet_kinds[packet.kind as usize] += 1;
    }

    Ok(Frame {
        size_words,
        packet_count,
        number,
        packet_kinds,
    })
}
