pub const SOURCE_PORT_RANGE: std::ops::Range<usize> = 0..2;
pub const DESTINATION_PORT_RANGE: std::ops::Range<usize> = 2..4;
pub const SEQUENCE_RANGE: std::ops::Range<usize> = 4..8;
pub const ACKNOWLEDGMENT_RANGE: std::ops::Range<usize> = 8..12;
pub const OFFSET_FLAGS_RANGE: std::ops::Range<usize> = 12..14;
pub const WINDOW_RANGE: std::ops::Range<usize> = 14..16;
pub const CHECKSUM_RANGE: std::ops::Range<usize> = 16..18;
pub const URGENT_POINTER_RANGE: std::ops::Range<usize> = 18..20;
pub const OPTIONS_OFFSET: usize = 20;

pub const MIN_HEADER_LEN: usize = 20;
/// Data offset counts 32-bit words.
pub const DATA_OFFSET_WORD_LEN: usize = 4;

// Offset/flags word: data offset in bits 15..12, reserved in bits 11..6,
// control flags in bits 5..0.
pub const DATA_OFFSET_MASK: u16 = 0xf000;
pub const DATA_OFFSET_SHIFT: u32 = 12;
pub const RESERVED_MASK: u16 = 0x0fc0;
pub const RESERVED_SHIFT: u32 = 6;
pub const URG_MASK: u16 = 0x0020;
pub const ACK_MASK: u16 = 0x0010;
pub const PSH_MASK: u16 = 0x0008;
pub const RST_MASK: u16 = 0x0004;
pub const SYN_MASK: u16 = 0x0002;
pub const FIN_MASK: u16 = 0x0001;

pub const OPTION_END: u8 = 0;
pub const OPTION_NOP: u8 = 1;
