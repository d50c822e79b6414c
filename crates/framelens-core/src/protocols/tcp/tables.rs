//! IANA TCP option kinds.

use crate::protocols::common::lookup::{CodeName, lookup};

pub static OPTION_KINDS: &[(u8, &str)] = &[
    (0, "End of Option List"),
    (1, "No Operation"),
    (2, "Maximum Segment Size"),
    (3, "Window Scale"),
    (4, "SACK Permitted"),
    (5, "SACK"),
    (6, "Echo"),
    (7, "Echo Reply"),
    (8, "Timestamps"),
    (9, "Partial Order Connection Permitted"),
    (10, "Partial Order Service Profile"),
    (11, "CC"),
    (12, "CC.NEW"),
    (13, "CC.ECHO"),
    (14, "TCP Alternate Checksum Request"),
    (15, "TCP Alternate Checksum Data"),
    (16, "Skeeter"),
    (17, "Bubba"),
    (18, "Trailer Checksum"),
    (19, "MD5 Signature"),
    (20, "SCPS Capabilities"),
    (21, "Selective Negative Acknowledgements"),
    (22, "Record Boundaries"),
    (23, "Corruption experienced"),
    (24, "SNAP"),
    (26, "TCP Compression Filter"),
    (27, "Quick-Start Response"),
    (28, "User Timeout"),
    (29, "TCP-AO"),
    (30, "MPTCP"),
    (34, "TCP Fast Open Cookie"),
];

pub fn option_kind(kind: u8) -> CodeName<u8> {
    lookup(OPTION_KINDS, kind)
}

#[cfg(test)]
mod tests {
    use super::option_kind;

    #[test]
    fn common_option_kinds() {
        assert_eq!(option_kind(2).name, "Maximum Segment Size");
        assert_eq!(option_kind(8).name, "Timestamps");
        assert_eq!(option_kind(25).name, "Unknown");
        assert_eq!(option_kind(25).value, 25);
    }
}
