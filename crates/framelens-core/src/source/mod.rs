//! Frame sources feeding the decoder.
//!
//! A source yields captured frames in capture order; it owns the buffers and
//! the link-layer metadata needed to pick the top-level decoder. Live capture
//! is not provided; `PcapFileSource` replays capture files.

mod pcap;

pub use pcap::PcapFileSource;

use pcap_parser::Linktype;
use thiserror::Error;

use crate::protocols::ProtocolId;

/// Link-layer framing of a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    Ethernet,
    /// Bare IP packet; the version nibble selects the decoder.
    Raw,
    Other(i32),
}

impl LinkType {
    /// Top-level decoder for a frame of this link type, if any.
    ///
    /// # Examples
    /// ```
    /// use framelens_core::{LinkType, ProtocolId};
    ///
    /// assert_eq!(LinkType::Ethernet.top_protocol(&[]), Some(ProtocolId::Ethernet));
    /// assert_eq!(LinkType::Raw.top_protocol(&[0x45]), Some(ProtocolId::IpV4));
    /// assert_eq!(LinkType::Raw.top_protocol(&[0x60]), None);
    /// ```
    pub fn top_protocol(&self, data: &[u8]) -> Option<ProtocolId> {
        match self {
            LinkType::Ethernet => Some(ProtocolId::Ethernet),
            LinkType::Raw => match data.first().map(|byte| byte >> 4) {
                Some(4) => Some(ProtocolId::IpV4),
                _ => None,
            },
            LinkType::Other(_) => None,
        }
    }
}

impl From<Linktype> for LinkType {
    fn from(value: Linktype) -> Self {
        match value {
            Linktype::ETHERNET => LinkType::Ethernet,
            Linktype::RAW | Linktype::IPV4 => LinkType::Raw,
            other => LinkType::Other(other.0),
        }
    }
}

/// One captured frame.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Zero-based position in the capture.
    pub index: u64,
    /// Capture timestamp in seconds since the Unix epoch.
    pub ts: Option<f64>,
    pub link: LinkType,
    /// Length of the frame on the wire; may exceed `data.len()` when the
    /// capture snap length truncated it.
    pub original_len: usize,
    pub data: Vec<u8>,
}

impl CapturedFrame {
    pub fn captured_len(&self) -> usize {
        self.data.len()
    }

    pub fn truncated(&self) -> bool {
        self.data.len() < self.original_len
    }
}

pub trait PacketSource {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PCAP parse error: {0}")]
    Pcap(String),
}

impl From<pcap::error::PcapSourceError> for SourceError {
    fn from(value: pcap::error::PcapSourceError) -> Self {
        match value {
            pcap::error::PcapSourceError::Io(err) => SourceError::Io(err),
            pcap::error::PcapSourceError::Pcap { context, message } => {
                SourceError::Pcap(format!("{context}: {message}"))
            }
        }
    }
}
