pub const TYPE_OFFSET: usize = 0;
pub const CODE_OFFSET: usize = 1;
pub const CHECKSUM_RANGE: std::ops::Range<usize> = 2..4;

pub const HEADER_LEN: usize = 4;

pub const TYPE_DESTINATION_UNREACHABLE: u8 = 3;
pub const TYPE_ECHO: u8 = 8;
