use thiserror::Error;

use crate::FrameRecord;
use crate::protocols::{DecodeError, ProtocolId, decode};
use crate::source::{CapturedFrame, LinkType};

#[derive(Debug, Error)]
pub(crate) enum FrameError {
    #[error("unsupported link type: {0:?}")]
    UnsupportedLink(LinkType),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Decoded frame plus the protocol chain used for statistics.
pub(crate) struct FrameOutcome {
    pub(crate) record: FrameRecord,
    pub(crate) chain: Vec<ProtocolId>,
}

pub(crate) fn decode_frame(
    frame: &CapturedFrame,
    timestamp: Option<String>,
    include_layers: bool,
) -> FrameOutcome {
    let mut record = FrameRecord {
        index: frame.index,
        timestamp,
        captured_len: frame.captured_len(),
        original_len: frame.original_len,
        truncated: frame.truncated(),
        protocols: Vec::new(),
        summary: None,
        layers: None,
        error: None,
    };

    let chain = match decode_layers(frame, include_layers) {
        Ok((chain, summary, layers)) => {
            record.protocols = chain.iter().map(|id| id.name().to_string()).collect();
            record.summary = Some(summary);
            record.layers = layers;
            chain
        }
        Err(err) => {
            log::warn!("frame {}: {err}", frame.index);
            record.error = Some(err.to_string());
            Vec::new()
        }
    };

    FrameOutcome { record, chain }
}

type Decoded = (Vec<ProtocolId>, String, Option<serde_json::Value>);

fn decode_layers(frame: &CapturedFrame, include_layers: bool) -> Result<Decoded, FrameError> {
    let top = frame
        .link
        .top_protocol(&frame.data)
        .ok_or(FrameError::UnsupportedLink(frame.link))?;
    let layer = decode(&frame.data, top)?;

    let layers = if include_layers {
        // Layer serialization only fails on non-string map keys, which it has none of.
        serde_json::to_value(&layer).ok()
    } else {
        None
    };
    Ok((layer.protocol_chain(), layer.to_string(), layers))
}
