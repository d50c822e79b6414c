use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::protocols::ProtocolId;
use crate::source::{PacketSource, PcapFileSource, SourceError};
use crate::{CaptureReport, CaptureSummary, DEFAULT_GENERATED_AT, ProtocolCount, make_stub_report};

mod frames;

use frames::{FrameOutcome, decode_frame};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Knobs for a capture run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    /// Stop after this many frames.
    pub limit: Option<u64>,
    /// Attach the serialized layer tree to every decoded frame record.
    pub include_layers: bool,
}

pub fn decode_capture_file(
    path: &Path,
    options: &AnalysisOptions,
) -> Result<CaptureReport, AnalysisError> {
    let source = PcapFileSource::open(path)?;
    decode_source(path, source, options)
}

/// Decode every frame of `source` into a report.
///
/// Frame decode failures are recorded and the run continues; source errors
/// abort it.
pub fn decode_source<S: PacketSource>(
    path: &Path,
    mut source: S,
    options: &AnalysisOptions,
) -> Result<CaptureReport, AnalysisError> {
    let mut summary = CaptureSummary::default();
    let mut first_ts = None;
    let mut last_ts = None;
    let mut protocol_frames: BTreeMap<ProtocolId, u64> = BTreeMap::new();
    let mut records = Vec::new();

    loop {
        // Checked before reading: records past the limit are never parsed.
        if options.limit.is_some_and(|limit| summary.frames_total >= limit) {
            log::debug!("frame limit reached after {} frames", summary.frames_total);
            break;
        }
        let Some(frame) = source.next_frame()? else {
            break;
        };
        summary.frames_total += 1;
        if frame.truncated() {
            summary.frames_truncated += 1;
        }
        update_ts_bounds(&mut first_ts, &mut last_ts, frame.ts);

        let FrameOutcome { record, chain } =
            decode_frame(&frame, ts_to_rfc3339(frame.ts), options.include_layers);
        if record.is_decoded() {
            summary.frames_decoded += 1;
        } else {
            summary.frames_failed += 1;
        }
        for protocol in chain {
            *protocol_frames.entry(protocol).or_default() += 1;
        }
        records.push(record);
    }

    log::info!(
        "decoded {} of {} frames ({} failed)",
        summary.frames_decoded,
        summary.frames_total,
        summary.frames_failed
    );

    summary.time_start = ts_to_rfc3339(first_ts);
    summary.time_end = ts_to_rfc3339(last_ts);

    let mut report = make_stub_report(&path.display().to_string(), path.metadata()?.len());
    report.generated_at = summary
        .time_end
        .clone()
        .or(summary.time_start.clone())
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());
    report.summary = summary;
    report.protocols = build_protocol_counts(protocol_frames);
    report.frames = records;
    Ok(report)
}

fn build_protocol_counts(protocol_frames: BTreeMap<ProtocolId, u64>) -> Vec<ProtocolCount> {
    // ProtocolId orders by code, so the map iterates in code order.
    protocol_frames
        .into_iter()
        .map(|(protocol, frames)| ProtocolCount {
            protocol: protocol.name().to_string(),
            code: protocol.code(),
            frames,
        })
        .collect()
}

fn update_ts_bounds(first: &mut Option<f64>, last: &mut Option<f64>, ts: Option<f64>) {
    let Some(ts) = ts else {
        return;
    };
    if first.is_none_or(|existing| ts < existing) {
        *first = Some(ts);
    }
    if last.is_none_or(|existing| ts > existing) {
        *last = Some(ts);
    }
}

fn ts_to_rfc3339(ts: Option<f64>) -> Option<String> {
    let ts = ts?;
    let nanos = (ts * 1_000_000_000.0) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::path::Path;

    use super::*;
    use crate::source::{CapturedFrame, LinkType};

    struct VecSource(VecDeque<CapturedFrame>);

    impl PacketSource for VecSource {
        fn next_frame(&mut self) -> Result<Option<CapturedFrame>, SourceError> {
            Ok(self.0.pop_front())
        }
    }

    fn udp_frame(index: u64, ts: f64) -> CapturedFrame {
        let mut data = vec![0xff; 6];
        data.extend_from_slice(&[0x02, 0, 0, 0, 0, 0x01]);
        data.extend_from_slice(&[0x08, 0x00]);
        data.extend_from_slice(&[
            0x45, 0x00, 0x00, 0x1e, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 10, 0, 0, 1,
            10, 0, 0, 2,
        ]);
        data.extend_from_slice(&[0x30, 0x39, 0x00, 0x35, 0x00, 0x0a, 0x00, 0x00, 0xab, 0xcd]);
        CapturedFrame {
            index,
            ts: Some(ts),
            link: LinkType::Ethernet,
            original_len: data.len(),
            data,
        }
    }

    fn broken_frame(index: u64) -> CapturedFrame {
        CapturedFrame {
            index,
            ts: None,
            link: LinkType::Ethernet,
            original_len: 64,
            data: vec![0; 8],
        }
    }

    fn manifest_path() -> &'static Path {
        Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"))
    }

    #[test]
    fn failures_do_not_abort_the_run() {
        let source = VecSource(VecDeque::from(vec![
            udp_frame(0, 1.0),
            broken_frame(1),
            udp_frame(2, 3.5),
        ]));
        let report =
            decode_source(manifest_path(), source, &AnalysisOptions::default()).expect("report");

        assert_eq!(report.summary.frames_total, 3);
        assert_eq!(report.summary.frames_decoded, 2);
        assert_eq!(report.summary.frames_failed, 1);
        assert_eq!(report.summary.frames_truncated, 1);
        assert_eq!(report.frames.len(), 3);
        assert!(report.frames[1].error.is_some());
        assert_eq!(report.generated_at, "1970-01-01T00:00:03.5Z");
    }

    #[test]
    fn protocol_counts_sorted_by_code() {
        let source = VecSource(VecDeque::from(vec![udp_frame(0, 1.0), udp_frame(1, 2.0)]));
        let report =
            decode_source(manifest_path(), source, &AnalysisOptions::default()).expect("report");

        let names: Vec<&str> = report.protocols.iter().map(|p| p.protocol.as_str()).collect();
        assert_eq!(names, vec!["Ethernet", "IpV4", "Udp"]);
        assert!(report.protocols.iter().all(|p| p.frames == 2));
        assert!(report.protocols.windows(2).all(|w| w[0].code < w[1].code));
    }

    #[test]
    fn limit_stops_early() {
        let source = VecSource(VecDeque::from(vec![
            udp_frame(0, 1.0),
            udp_frame(1, 2.0),
            udp_frame(2, 3.0),
        ]));
        let options = AnalysisOptions {
            limit: Some(2),
            include_layers: false,
        };
        let report = decode_source(manifest_path(), source, &options).expect("report");
        assert_eq!(report.summary.frames_total, 2);
        assert_eq!(report.frames.len(), 2);
    }

    /// Yields its frames, then fails on every further read.
    struct FailingSource(VecDeque<CapturedFrame>);

    impl PacketSource for FailingSource {
        fn next_frame(&mut self) -> Result<Option<CapturedFrame>, SourceError> {
            match self.0.pop_front() {
                Some(frame) => Ok(Some(frame)),
                None => Err(SourceError::Pcap("truncated record".to_string())),
            }
        }
    }

    #[test]
    fn limit_does_not_read_past_last_frame() {
        let options = AnalysisOptions {
            limit: Some(1),
            include_layers: false,
        };
        let source = FailingSource(VecDeque::from(vec![udp_frame(0, 1.0)]));
        let report = decode_source(manifest_path(), source, &options).expect("report");
        assert_eq!(report.summary.frames_total, 1);
        assert_eq!(report.summary.frames_decoded, 1);

        let source = FailingSource(VecDeque::from(vec![udp_frame(0, 1.0)]));
        let err = decode_source(manifest_path(), source, &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Source(SourceError::Pcap(_))));
    }

    #[test]
    fn zero_limit_reads_nothing() {
        let options = AnalysisOptions {
            limit: Some(0),
            include_layers: false,
        };
        let source = FailingSource(VecDeque::new());
        let report = decode_source(manifest_path(), source, &options).expect("report");
        assert_eq!(report.summary.frames_total, 0);
        assert!(report.frames.is_empty());
        assert_eq!(report.generated_at, DEFAULT_GENERATED_AT);
    }

    #[test]
    fn ts_bounds_track_min_and_max() {
        let mut first = None;
        let mut last = None;
        update_ts_bounds(&mut first, &mut last, Some(5.0));
        update_ts_bounds(&mut first, &mut last, Some(2.0));
        update_ts_bounds(&mut first, &mut last, None);
        update_ts_bounds(&mut first, &mut last, Some(9.0));
        assert_eq!(first, Some(2.0));
        assert_eq!(last, Some(9.0));
    }

    #[test]
    fn rfc3339_conversion() {
        assert_eq!(ts_to_rfc3339(Some(0.0)).as_deref(), Some("1970-01-01T00:00:00Z"));
        assert_eq!(ts_to_rfc3339(None), None);
    }
}
