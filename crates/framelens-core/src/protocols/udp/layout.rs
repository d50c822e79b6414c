pub const SOURCE_PORT_RANGE: std::ops::Range<usize> = 0..2;
pub const DESTINATION_PORT_RANGE: std::ops::Range<usize> = 2..4;
pub const LENGTH_RANGE: std::ops::Range<usize> = 4..6;
pub const CHECKSUM_RANGE: std::ops::Range<usize> = 6..8;

pub const HEADER_LEN: usize = 8;
