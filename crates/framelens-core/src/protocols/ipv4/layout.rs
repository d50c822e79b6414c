pub const VERSION_IHL_OFFSET: usize = 0;
pub const TOS_OFFSET: usize = 1;
pub const TOTAL_LENGTH_RANGE: std::ops::Range<usize> = 2..4;
pub const IDENTIFICATION_RANGE: std::ops::Range<usize> = 4..6;
pub const FLAGS_FRAGMENT_RANGE: std::ops::Range<usize> = 6..8;
pub const TTL_OFFSET: usize = 8;
pub const PROTOCOL_OFFSET: usize = 9;
pub const CHECKSUM_RANGE: std::ops::Range<usize> = 10..12;
pub const SOURCE_RANGE: std::ops::Range<usize> = 12..16;
pub const DESTINATION_RANGE: std::ops::Range<usize> = 16..20;
pub const OPTIONS_OFFSET: usize = 20;

pub const MIN_HEADER_LEN: usize = 20;
/// IHL counts 32-bit words.
pub const IHL_WORD_LEN: usize = 4;

// Byte 0: version in the high nibble, IHL in the low nibble.
pub const VERSION_MASK: u8 = 0xf0;
pub const VERSION_SHIFT: u32 = 4;
pub const IHL_MASK: u8 = 0x0f;

// Flags/fragment word (RFC 791): bit 15 reserved, bit 14 DF, bit 13 MF,
// bits 12..0 fragment offset in 8-byte units.
pub const RESERVED_FLAG_MASK: u16 = 0x8000;
pub const DONT_FRAGMENT_MASK: u16 = 0x4000;
pub const MORE_FRAGMENTS_MASK: u16 = 0x2000;
pub const FRAGMENT_OFFSET_MASK: u16 = 0x1fff;

pub const PROTOCOL_ICMP: u8 = 1;
pub const PROTOCOL_TCP: u8 = 6;
pub const PROTOCOL_UDP: u8 = 17;
