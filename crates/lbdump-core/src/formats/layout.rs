//! Byte-level constants for the LBD container family.
//!
//! All multi-byte fields in these formats are little-endian. The magic
//! values below are the 32-bit numbers the files carry, not the ASCII
//! mnemonics; fixture builders and decoders both derive their bytes from
//! these constants so the two can never drift apart.

/// LBD file signature, read as a little-endian signed 32-bit value.
pub const LBD_MAGIC: i32 = 0x0001_0001;

/// LMM block signature. The on-disk byte order spells `MML `.
pub const LMM_MAGIC: i32 = 0x204C_4D4D;

/// MOM block signature, `MOM ` on disk.
pub const MOM_MAGIC: i32 = 0x204D_4F4D;

/// MOS block signature, `MOS ` on disk.
pub const MOS_MAGIC: i32 = 0x2053_4F4D;

/// Single-byte TOD stream signature.
pub const TOD_MAGIC: u8 = 0x50;

/// Reserved region between the LBD signature and the LMM offset field.
pub const LBD_RESERVED_LEN: u64 = 12;

/// Packet and frame lengths count 4-byte words.
pub const WORD_SIZE: u64 = 4;

/// Fixed packet prefix: object ID, kind/flag byte, length byte.
pub const PACKET_HEADER_LEN: u64 = 4;

/// Packet kind labels indexed by the 4-bit kind value. Kinds past the end
/// of the table have no name and render as 4-digit binary text instead.
pub const PACKET_KIND_LABELS: [&str; 9] = [
    "attribute",
    "coordinate (RST)",
    "TMD data ID",
    "Parent object ID",
    "Matrix value",
    "TMD data",
    "Light source",
    "Camera",
    "Object control",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signatures_match_their_on_disk_bytes() {
        assert_eq!(LBD_MAGIC.to_le_bytes(), [0x01, 0x00, 0x01, 0x00]);
        assert_eq!(LMM_MAGIC, i32::from_le_bytes(*b"MML "));
        assert_eq!(MOM_MAGIC, i32::from_le_bytes(*b"MOM "));
        assert_eq!(MOS_MAGIC, i32::from_le_bytes(*b"MOS "));
    }
}
