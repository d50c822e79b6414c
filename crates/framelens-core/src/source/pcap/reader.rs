use std::io::{Read, Seek, SeekFrom};

use pcap_parser::Linktype;

use super::error::PcapSourceError;
use super::layout;

/// Read the magic bytes and rewind the reader to the start.
///
/// # Errors
/// Returns `PcapSourceError::Io` when the reader cannot be read or rewound,
/// including files shorter than four bytes.
pub fn read_magic_and_rewind<R: Read + Seek>(reader: &mut R) -> Result<[u8; 4], PcapSourceError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(magic)
}

pub fn is_pcapng_magic(magic: &[u8; 4]) -> bool {
    magic == &layout::PCAPNG_MAGIC
}

/// Link type and timestamp resolution shared by the records of one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interface {
    pub linktype: Linktype,
    /// Timestamp units per second.
    pub ts_units: u64,
}

impl Default for Interface {
    fn default() -> Self {
        Self {
            linktype: Linktype::ETHERNET,
            ts_units: layout::MICROS_PER_SECOND,
        }
    }
}

/// Resolve a PCAPNG interface id, defaulting to Ethernet with microsecond timestamps.
pub fn interface_for_id(interfaces: &[Interface], if_id: u32) -> Interface {
    interfaces.get(if_id as usize).copied().unwrap_or_default()
}

/// Units per second for a legacy file header.
pub fn legacy_ts_units(nanosecond_precision: bool) -> u64 {
    if nanosecond_precision {
        layout::NANOS_PER_SECOND
    } else {
        layout::MICROS_PER_SECOND
    }
}

/// Units per second encoded by a PCAPNG `if_tsresol` option.
///
/// The low seven bits are a negative exponent of ten, or of two when the high
/// bit is set. Resolutions that overflow a `u64` fall back to microseconds.
pub fn tsresol_units(if_tsresol: u8) -> u64 {
    let exponent = u32::from(if_tsresol & layout::TSRESOL_EXPONENT_MASK);
    let base: u64 = if if_tsresol & layout::TSRESOL_BINARY_FLAG != 0 {
        2
    } else {
        10
    };
    base.checked_pow(exponent).unwrap_or(layout::MICROS_PER_SECOND)
}

/// Convert a legacy record timestamp (seconds + fraction in `ts_units`) to seconds.
pub fn legacy_ts_to_seconds(ts_sec: u32, ts_frac: u32, ts_units: u64) -> f64 {
    ts_sec as f64 + ts_frac as f64 / ts_units as f64
}

/// Convert a PCAPNG high/low timestamp counted in `ts_units` to seconds.
pub fn pcapng_ts_to_seconds(ts_high: u32, ts_low: u32, ts_units: u64) -> f64 {
    let ts = ((ts_high as u64) << 32) | (ts_low as u64);
    let secs = ts / ts_units;
    let frac = ts % ts_units;
    secs as f64 + frac as f64 / ts_units as f64
}

#[cfg(test)]
mod tests {
    use super::{
        Interface, interface_for_id, is_pcapng_magic, legacy_ts_to_seconds, legacy_ts_units,
        pcapng_ts_to_seconds, read_magic_and_rewind, tsresol_units,
    };
    use crate::source::pcap::error::PcapSourceError;
    use pcap_parser::Linktype;
    use std::io::{Cursor, Read};

    #[test]
    fn detect_pcapng_magic() {
        assert!(is_pcapng_magic(&[0x0a, 0x0d, 0x0d, 0x0a]));
        assert!(!is_pcapng_magic(&[0xd4, 0xc3, 0xb2, 0xa1]));
    }

    #[test]
    fn read_magic_rewinds() {
        let mut cursor = Cursor::new([0xd4, 0xc3, 0xb2, 0xa1, 0x02]);
        let magic = read_magic_and_rewind(&mut cursor).unwrap();
        assert_eq!(magic, [0xd4, 0xc3, 0xb2, 0xa1]);
        let mut buf = [0u8; 1];
        cursor.read_exact(&mut buf).unwrap();
        assert_eq!(buf[0], 0xd4);
    }

    #[test]
    fn read_magic_too_short() {
        let mut cursor = Cursor::new([0x0a, 0x0d]);
        let err = read_magic_and_rewind(&mut cursor).unwrap_err();
        assert!(matches!(err, PcapSourceError::Io(_)));
    }

    #[test]
    fn unknown_interface_defaults_to_ethernet() {
        let raw = Interface {
            linktype: Linktype::RAW,
            ts_units: 1_000,
        };
        assert_eq!(interface_for_id(&[raw], 0), raw);
        let fallback = interface_for_id(&[raw], 3);
        assert_eq!(fallback.linktype, Linktype::ETHERNET);
        assert_eq!(fallback.ts_units, 1_000_000);
    }

    #[test]
    fn timestamps_in_seconds() {
        assert!((legacy_ts_to_seconds(10, 250_000, 1_000_000) - 10.25).abs() < 1e-9);
        assert!((pcapng_ts_to_seconds(0, 1_500_000, 1_000_000) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn nanosecond_timestamps_in_seconds() {
        let units = legacy_ts_units(true);
        assert_eq!(units, 1_000_000_000);
        assert!((legacy_ts_to_seconds(1, 500_000_000, units) - 1.5).abs() < 1e-9);
        assert_eq!(legacy_ts_units(false), 1_000_000);
        // 1.5 s at nanosecond resolution needs the high word.
        let ts: u64 = 1_700_000_000_500_000_000;
        let secs = pcapng_ts_to_seconds((ts >> 32) as u32, ts as u32, units);
        assert!((secs - 1_700_000_000.5).abs() < 1e-6);
    }

    #[test]
    fn tsresol_decimal_and_binary() {
        assert_eq!(tsresol_units(6), 1_000_000);
        assert_eq!(tsresol_units(9), 1_000_000_000);
        assert_eq!(tsresol_units(0), 1);
        assert_eq!(tsresol_units(0x80 | 10), 1_024);
        assert_eq!(tsresol_units(0x80 | 63), 1 << 63);
        // 10^20 and 2^64 do not fit.
        assert_eq!(tsresol_units(20), 1_000_000);
        assert_eq!(tsresol_units(0x80 | 64), 1_000_000);
    }
}
