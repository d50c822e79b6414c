use std::fs::File;
use std::path::Path;

use pcap_parser::{
    Block, LegacyPcapReader, Linktype, PcapBlockOwned, PcapError, PcapNGReader,
    traits::{PcapNGPacketBlock, PcapReaderIterator},
};

use crate::source::{CapturedFrame, PacketSource, SourceError};

use super::error::PcapSourceError;
use super::layout;
use super::reader::{
    Interface, interface_for_id, is_pcapng_magic, legacy_ts_to_seconds, legacy_ts_units,
    pcapng_ts_to_seconds, read_magic_and_rewind, tsresol_units,
};

/// Capture file source; format is chosen from the magic number.
pub struct PcapFileSource {
    inner: PcapReader,
    next_index: u64,
}

enum PcapReader {
    Legacy {
        reader: LegacyPcapReader<File>,
        /// Set by the file header; every record shares it.
        interface: Interface,
    },
    Ng {
        reader: PcapNGReader<File>,
        /// Interfaces of the current section, by id.
        interfaces: Vec<Interface>,
    },
}

/// Frame fields extracted from one packet block, before indexing.
struct RawFrame {
    ts: f64,
    linktype: Linktype,
    original_len: usize,
    data: Vec<u8>,
}

impl PcapFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        let inner = create_reader(file)?;
        Ok(Self {
            inner,
            next_index: 0,
        })
    }
}

impl PacketSource for PcapFileSource {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>, SourceError> {
        let Some(raw) = next_raw_frame(&mut self.inner)? else {
            return Ok(None);
        };
        let index = self.next_index;
        self.next_index += 1;
        Ok(Some(CapturedFrame {
            index,
            ts: Some(raw.ts),
            link: raw.linktype.into(),
            original_len: raw.original_len,
            data: raw.data,
        }))
    }
}

fn create_reader(mut file: File) -> Result<PcapReader, PcapSourceError> {
    let magic = read_magic_and_rewind(&mut file)?;

    if is_pcapng_magic(&magic) {
        let reader = PcapNGReader::new(layout::PCAP_READER_BUFFER_SIZE, file).map_err(|e| {
            PcapSourceError::Pcap {
                context: "pcapng reader init",
                message: e.to_string(),
            }
        })?;
        Ok(PcapReader::Ng {
            reader,
            interfaces: Vec::new(),
        })
    } else {
        let reader = LegacyPcapReader::new(layout::PCAP_READER_BUFFER_SIZE, file).map_err(|e| {
            PcapSourceError::Pcap {
                context: "pcap reader init",
                message: e.to_string(),
            }
        })?;
        Ok(PcapReader::Legacy {
            reader,
            interface: Interface::default(),
        })
    }
}

/// Outcome of one block read, detached from the reader's buffer.
enum Step {
    Frame(Option<RawFrame>),
    Eof,
    Incomplete,
    Failed(String),
}

impl From<PcapError<&[u8]>> for Step {
    fn from(err: PcapError<&[u8]>) -> Self {
        match err {
            PcapError::Eof => Step::Eof,
            PcapError::Incomplete(_) => Step::Incomplete,
            other => Step::Failed(other.to_string()),
        }
    }
}

fn next_raw_frame(reader: &mut PcapReader) -> Result<Option<RawFrame>, PcapSourceError> {
    loop {
        let step = match reader {
            PcapReader::Legacy { reader, interface } => match reader.next() {
                Ok((offset, block)) => {
                    let frame = legacy_block(block, interface);
                    reader.consume(offset);
                    Step::Frame(frame)
                }
                Err(err) => Step::from(err),
            },
            PcapReader::Ng { reader, interfaces } => match reader.next() {
                Ok((offset, block)) => {
                    let frame = ng_block(block, interfaces);
                    reader.consume(offset);
                    Step::Frame(frame)
                }
                Err(err) => Step::from(err),
            },
        };

        match step {
            Step::Frame(Some(frame)) => return Ok(Some(frame)),
            Step::Frame(None) => continue,
            Step::Eof => return Ok(None),
            Step::Incomplete => refill(reader)?,
            Step::Failed(message) => {
                return Err(PcapSourceError::Pcap {
                    context: "pcap reader next",
                    message,
                });
            }
        }
    }
}

fn refill(reader: &mut PcapReader) -> Result<(), PcapSourceError> {
    let (result, context) = match reader {
        PcapReader::Legacy { reader, .. } => (reader.refill(), "pcap reader refill"),
        PcapReader::Ng { reader, .. } => (reader.refill(), "pcapng reader refill"),
    };
    result.map_err(|e| PcapSourceError::Pcap {
        context,
        message: e.to_string(),
    })
}

fn legacy_block(block: PcapBlockOwned<'_>, interface: &mut Interface) -> Option<RawFrame> {
    match block {
        PcapBlockOwned::LegacyHeader(header) => {
            *interface = Interface {
                linktype: header.network,
                ts_units: legacy_ts_units(header.is_nanosecond_precision()),
            };
            None
        }
        PcapBlockOwned::Legacy(packet) => Some(RawFrame {
            ts: legacy_ts_to_seconds(packet.ts_sec, packet.ts_usec, interface.ts_units),
            linktype: interface.linktype,
            original_len: packet.origlen as usize,
            data: packet.data.to_vec(),
        }),
        _ => None,
    }
}

fn ng_block(block: PcapBlockOwned<'_>, interfaces: &mut Vec<Interface>) -> Option<RawFrame> {
    match block {
        PcapBlockOwned::NG(Block::SectionHeader(_)) => {
            // Interface ids restart with every section.
            interfaces.clear();
            None
        }
        PcapBlockOwned::NG(Block::InterfaceDescription(intf)) => {
            interfaces.push(Interface {
                linktype: intf.linktype,
                ts_units: tsresol_units(intf.if_tsresol),
            });
            None
        }
        PcapBlockOwned::NG(Block::EnhancedPacket(packet)) => {
            let interface = interface_for_id(interfaces, packet.if_id);
            Some(RawFrame {
                ts: pcapng_ts_to_seconds(packet.ts_high, packet.ts_low, interface.ts_units),
                linktype: interface.linktype,
                original_len: packet.origlen as usize,
                // `data` keeps the block's 32-bit padding.
                data: packet.packet_data().to_vec(),
            })
        }
        _ => None,
    }
}
