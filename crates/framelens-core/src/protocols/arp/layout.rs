pub const HARDWARE_TYPE_RANGE: std::ops::Range<usize> = 0..2;
pub const PROTOCOL_TYPE_RANGE: std::ops::Range<usize> = 2..4;
pub const HARDWARE_ADDR_LEN_OFFSET: usize = 4;
pub const PROTOCOL_ADDR_LEN_OFFSET: usize = 5;
pub const OPERATION_RANGE: std::ops::Range<usize> = 6..8;
pub const SENDER_MAC_RANGE: std::ops::Range<usize> = 8..14;
pub const SENDER_IP_RANGE: std::ops::Range<usize> = 14..18;
pub const TARGET_MAC_RANGE: std::ops::Range<usize> = 18..24;
pub const TARGET_IP_RANGE: std::ops::Range<usize> = 24..28;

pub const HEADER_LEN: usize = 28;

pub const OPERATION_REQUEST: u16 = 1;
pub const OPERATION_REPLY: u16 = 2;
