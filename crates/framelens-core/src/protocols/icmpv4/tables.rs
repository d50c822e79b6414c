//! IANA ICMP type and code registries.

use serde::Serialize;

use crate::protocols::common::lookup::{CodeName, lookup};

pub static TYPES: &[(u8, &str)] = &[
    (0, "Echo Reply"),
    (3, "Destination Unreachable"),
    (4, "Source Quench"),
    (5, "Redirect"),
    (6, "Alternate Host Address"),
    (8, "Echo"),
    (9, "Router Advertisement"),
    (10, "Router Solicitation"),
    (11, "Time Exceeded"),
    (12, "Parameter Problem"),
    (13, "Timestamp"),
    (14, "Timestamp Reply"),
    (15, "Information Request"),
    (16, "Information Reply"),
    (17, "Address Mask Request"),
    (18, "Address Mask Reply"),
    (30, "Traceroute"),
    (31, "Datagram Conversion Error"),
    (32, "Mobile Host Redirect"),
    (33, "IPv6 Where-Are-You"),
    (34, "IPv6 I-Am-Here"),
    (35, "Mobile Registration Request"),
    (36, "Mobile Registration Reply"),
    (37, "Domain Name Request"),
    (38, "Domain Name Reply"),
    (39, "SKIP"),
    (40, "Photuris"),
];

/// Keyed on (type, code).
pub static DETAILS: &[(u8, u8, &str)] = &[
    (3, 0, "Network Unreachable"),
    (3, 1, "Host Unreachable"),
    (3, 2, "Protocol Unreachable"),
    (3, 3, "Port Unreachable"),
    (3, 4, "Fragmentation needed but no fragment bit set"),
    (3, 5, "Source routing failed"),
    (3, 6, "Destination network unknown"),
    (3, 7, "Destination host unknown"),
    (3, 8, "Source host isolated"),
    (3, 9, "Destination network administratively prohibited"),
    (3, 10, "Destination host administratively prohibited"),
    (3, 11, "Network unreachable for TOS"),
    (3, 12, "Host unreachable for TOS"),
    (3, 13, "Communication administratively prohibited by filtering"),
    (3, 14, "Host precedence violation"),
    (3, 15, "Precedence cutoff in effect"),
    (5, 0, "Redirect datagrams for the Network"),
    (5, 1, "Redirect datagrams for the Host"),
    (5, 2, "Redirect datagrams for the Type of Service and Network"),
    (5, 3, "Redirect datagrams for the Type of Service and Host"),
    (6, 0, "Alternate Address for Host"),
    (9, 0, "Normal router advertisement"),
    (9, 16, "Does not route common traffic"),
    (11, 0, "Time to Live exceeded during transit"),
    (11, 1, "Fragment Reassembly Time Exceeded"),
    (12, 0, "Pointer indicates the error"),
    (12, 1, "Missing a Required Option"),
    (12, 2, "Bad Length"),
    (40, 0, "Bad SPI"),
    (40, 1, "Authentication Failed"),
    (40, 2, "Decompression Failed"),
    (40, 3, "Decryption Failed"),
    (40, 4, "Need Authentication"),
    (40, 5, "Need Authorization"),
];

pub const NO_DETAIL: &str = "No Detail";

/// Name of a (type, code) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IcmpDetail {
    pub type_value: u8,
    pub code: u8,
    pub name: &'static str,
}

impl IcmpDetail {
    pub fn has_detail(&self) -> bool {
        self.name != NO_DETAIL
    }
}

pub fn icmp_type(value: u8) -> CodeName<u8> {
    lookup(TYPES, value)
}

/// Resolve a (type, code) pair. Unmatched pairs keep both raw values and
/// are named [`NO_DETAIL`], independently of whether the type is known.
pub fn icmp_detail(type_value: u8, code: u8) -> IcmpDetail {
    let name = DETAILS
        .iter()
        .find(|(t, c, _)| *t == type_value && *c == code)
        .map(|&(_, _, name)| name)
        .unwrap_or(NO_DETAIL);
    IcmpDetail {
        type_value,
        code,
        name,
    }
}
