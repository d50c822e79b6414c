//! Static code→name lookups.
//!
//! Tables are plain `static` slices searched linearly; they are small, never
//! mutated, and safe to read from any thread. A missing code is not an error:
//! it resolves to [`UNKNOWN`] while keeping the raw value.

use std::fmt;

use serde::Serialize;

use crate::protocols::registry::ProtocolId;

/// Placeholder name for codes absent from a table.
pub const UNKNOWN: &str = "Unknown";

/// A numeric code paired with its descriptive name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeName<T> {
    pub value: T,
    pub name: &'static str,
    #[serde(skip)]
    known: bool,
}

impl<T> CodeName<T> {
    pub fn unknown(value: T) -> Self {
        Self {
            value,
            name: UNKNOWN,
            known: false,
        }
    }

    pub fn is_known(&self) -> bool {
        self.known
    }
}

/// Resolve `value` against `table`, falling back to [`UNKNOWN`].
///
/// # Examples
/// ```
/// use framelens_core::protocols::common::lookup::lookup;
///
/// static TABLE: &[(u16, &str)] = &[(1, "REQUEST"), (2, "REPLY")];
/// assert_eq!(lookup(TABLE, 2).name, "REPLY");
/// assert_eq!(lookup(TABLE, 9999).name, "Unknown");
/// assert_eq!(lookup(TABLE, 9999).value, 9999);
/// ```
pub fn lookup<T: Copy + PartialEq>(table: &[(T, &'static str)], value: T) -> CodeName<T> {
    table
        .iter()
        .find(|(code, _)| *code == value)
        .map(|&(_, name)| CodeName {
            value,
            name,
            known: true,
        })
        .unwrap_or_else(|| CodeName::unknown(value))
}

impl<T: fmt::Display> fmt::Display for CodeName<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.value)
    }
}

/// A code field that selects the protocol carried in the payload.
///
/// `protocol` is `None` when the code has no registered child decoder; the
/// owning layer then stops descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProtocolCode<T> {
    pub value: T,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ProtocolId>,
}

impl<T> ProtocolCode<T> {
    pub fn is_known(&self) -> bool {
        self.protocol.is_some()
    }
}

/// Resolve a protocol selector against `table`.
pub fn resolve_protocol<T: Copy + PartialEq>(
    table: &[(T, &'static str, ProtocolId)],
    value: T,
) -> ProtocolCode<T> {
    table
        .iter()
        .find(|(code, _, _)| *code == value)
        .map(|&(_, name, protocol)| ProtocolCode {
            value,
            name,
            protocol: Some(protocol),
        })
        .unwrap_or(ProtocolCode {
            value,
            name: UNKNOWN,
            protocol: None,
        })
}
