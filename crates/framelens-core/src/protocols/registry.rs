use std::fmt;

use serde::{Serialize, Serializer};

/// Closed registry of protocol identifiers used as dispatch keys.
///
/// Identity is the variant itself; `name` and `code` are fixed per variant.
/// Declaration order follows `code`, so the derived ordering sorts by code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProtocolId {
    Ethernet,
    IpV4,
    Arp,
    Tcp,
    Udp,
    IcmpV4,
    Http,
    Ssh,
}

impl ProtocolId {
    pub const ALL: [ProtocolId; 8] = [
        ProtocolId::Ethernet,
        ProtocolId::IpV4,
        ProtocolId::Arp,
        ProtocolId::Tcp,
        ProtocolId::Udp,
        ProtocolId::IcmpV4,
        ProtocolId::Http,
        ProtocolId::Ssh,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ProtocolId::Ethernet => "Ethernet",
            ProtocolId::IpV4 => "IpV4",
            ProtocolId::Arp => "Arp",
            ProtocolId::Tcp => "Tcp",
            ProtocolId::Udp => "Udp",
            ProtocolId::IcmpV4 => "IcmpV4",
            ProtocolId::Http => "Http",
            ProtocolId::Ssh => "Ssh",
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            ProtocolId::Ethernet => 1,
            ProtocolId::IpV4 => 2,
            ProtocolId::Arp => 3,
            ProtocolId::Tcp => 4,
            ProtocolId::Udp => 5,
            ProtocolId::IcmpV4 => 6,
            ProtocolId::Http => 7,
            ProtocolId::Ssh => 8,
        }
    }

    /// Look up a registered identifier by name, ignoring ASCII case.
    ///
    /// # Examples
    /// ```
    /// use framelens_core::ProtocolId;
    ///
    /// assert_eq!(ProtocolId::from_name("ipv4"), Some(ProtocolId::IpV4));
    /// assert_eq!(ProtocolId::from_name("sctp"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<ProtocolId> {
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ProtocolId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
