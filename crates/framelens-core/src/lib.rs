//! framelens core library: layered decoding of captured network frames.
//!
//! A frame is decoded as a strictly descending chain of layers
//! (Ethernet → ARP/IPv4 → TCP/UDP/ICMPv4). Each protocol module splits its
//! work into `layout` (offsets and masks), `reader` (safe byte access and
//! packed-field conventions) and `parser` (typed header); the dispatch factory
//! hands residual payloads to the next decoder. Decoding is pure and borrows
//! the frame buffer; all file I/O lives in `source`, and `analysis` drives a
//! source to build a deterministic capture report.
//!
//! Invariants:
//! - A layer's raw header is exactly its computed header length and its raw
//!   payload is exactly the remaining bytes.
//! - A layer has a next layer iff its header names a registered child protocol.
//! - Unknown codes never fail a decode; short buffers and unregistered
//!   protocols always do, and no partial layer is returned.
//!
//! # Examples
//! ```
//! use framelens_core::{ProtocolId, decode};
//!
//! let mut frame = vec![0xff; 6];
//! frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 0x01]);
//! frame.extend_from_slice(&[0x88, 0xcc]); // LLDP: not decoded further
//! frame.extend_from_slice(&[0x02, 0x07]);
//!
//! let layer = decode(&frame, ProtocolId::Ethernet)?;
//! assert!(!layer.can_descend());
//! assert_eq!(layer.raw_payload, &[0x02, 0x07]);
//! # Ok::<(), framelens_core::DecodeError>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
pub mod protocols;
mod source;

pub use analysis::{AnalysisError, AnalysisOptions, decode_capture_file, decode_source};
pub use protocols::{DecodeError, Header, Layer, ProtocolId, decode};
pub use source::{CapturedFrame, LinkType, PacketSource, PcapFileSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no capture time is available.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Decoded capture with frames in capture order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp; the last capture timestamp when known.
    pub generated_at: String,
    pub input: InputInfo,
    pub summary: CaptureSummary,
    /// Frames per protocol, sorted by protocol code.
    pub protocols: Vec<ProtocolCount>,
    /// Per-frame records in capture order.
    pub frames: Vec<FrameRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Capture-wide counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureSummary {
    pub frames_total: u64,
    pub frames_decoded: u64,
    pub frames_failed: u64,
    /// Frames whose captured length is below their wire length.
    pub frames_truncated: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
}

/// Number of frames containing a given protocol layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolCount {
    pub protocol: String,
    pub code: u8,
    pub frames: u64,
}

/// Outcome of decoding one frame.
///
/// Exactly one of `summary` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub index: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub captured_len: usize,
    pub original_len: usize,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
    /// Protocol names of the decoded layers, outermost first.
    pub protocols: Vec<String>,
    /// Text rendering of the layer chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Serialized layer tree, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FrameRecord {
    pub fn is_decoded(&self) -> bool {
        self.error.is_none()
    }
}

/// Build a report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use framelens_core::make_stub_report;
///
/// let report = make_stub_report("capture.pcapng", 123);
/// assert_eq!(report.report_version, framelens_core::REPORT_VERSION);
/// assert!(report.frames.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> CaptureReport {
    CaptureReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "framelens".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: CaptureSummary::default(),
        protocols: vec![],
        frames: vec![],
    }
}
