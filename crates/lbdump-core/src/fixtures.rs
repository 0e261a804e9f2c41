//! Synthetic LBD images for tests, demos and golden regeneration.
//!
//! The builders produce complete, deterministic in-memory files that
//! exercise the whole decode chain. They are test tooling rather than an
//! encoding API: blocks are laid out sequentially in the order the decoder
//! walks them, and informational offset and length fields hold the values
//! a well-formed sequential file would carry.

use crate::formats::layout;

/// File offset of the LMM block in built images: signature, reserved
/// region, then the two-byte offset field itself.
const LMM_OFFSET: u16 = 18;

/// TMD offset value stamped into MOM headers. Models are out of decoding
/// scope, so the value is only ever echoed into reports.
const TMD_OFFSET: u32 = 0x800;

/// Encode one packet with the given prefix fields and payload words. The
/// declared length covers the payload plus the one-word prefix.
pub fn packet(object_id: u16, kind: u8, flag: u8, payload_words: &[u32]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&object_id.to_le_bytes());
    out.push((flag << 4) | (kind & 0x0F));
    out.push(payload_words.len() as u8 + 1);
    for word in payload_words {
        out.extend_from_slice(&word.to_le_bytes());
    }
    out
}

/// Encode one frame holding the given packets.
pub fn frame(number: u32, size_words: u16, packets: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&size_words.to_le_bytes());
    out.extend_from_slice(&(packets.len() as u16).to_le_bytes());
    out.extend_from_slice(&number.to_le_bytes());
    for packet in packets {
        out.extend_from_slice(packet);
    }
    out
}

/// Encode a TOD stream carrying the given frames.
pub fn tod(version: u8, resolution: u16, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![layout::TOD_MAGIC, version];
    out.extend_from_slice(&resolution.to_le_bytes());
    out.extend_from_slice(&(frames.len() as u32).to_le_bytes());
    for frame in frames {
        out.extend_from_slice(frame);
    }
    out
}

/// Wrap a TOD stream in LBD, LMM, MOM and MOS headers. Declaring more than
/// one TOD switches the MOS header to its longer form with a length field,
/// though the image still embeds a single stream.
pub fn image(tod_count: u32, tod_stream: &[u8]) -> Vec<u8> {
    let mos_header_len: u32 = if tod_count > 1 { 16 } else { 12 };
    let mut out = Vec::new();

    out.extend_from_slice(&layout::LBD_MAGIC.to_le_bytes());
    out.extend_from_slice(&[0u8; layout::LBD_RESERVED_LEN as usize]);
    out.extend_from_slice(&LMM_OFFSET.to_le_bytes());

    out.extend_from_slice(&layout::LMM_MAGIC.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&12u32.to_le_bytes());

    out.extend_from_slice(&layout::MOM_MAGIC.to_le_bytes());
    let mom_length = 12 + mos_header_len + tod_stream.len() as u32;
    out.extend_from_slice(&mom_length.to_le_bytes());
    out.extend_from_slice(&TMD_OFFSET.to_le_bytes());

    out.extend_from_slice(&layout::MOS_MAGIC.to_le_bytes());
    out.extend_from_slice(&tod_count.to_le_bytes());
    out.extend_from_slice(&mos_header_len.to_le_bytes());
    if tod_count > 1 {
        out.extend_from_slice(&(tod_stream.len() as u32).to_le_bytes());
    }

    out.extend_from_slice(tod_stream);
    out
}

/// Minimal valid image: the full chain ending in an empty TOD.
pub fn empty_tod() -> Vec<u8> {
    image(1, &tod(1, 10, &[]))
}

/// One frame carrying a packet from the label table, the last table entry,
/// and an out-of-table kind that renders as binary text.
pub fn single_frame() -> Vec<u8> {
    let packets = [
        packet(1, 0, 0, &[0xAABB_CCDD]),
        packet(2, 8, 1, &[]),
        packet(7, 12, 3, &[1, 2]),
    ];
    image(1, &tod(2, 60, &[frame(0, 9, &packets)]))
}

/// Header variant declaring several TODs, so the MOS length field is
/// present and reported in bytes.
pub fn multi_tod() -> Vec<u8> {
    image(3, &tod(1, 30, &[frame(4, 2, &[])]))
}
