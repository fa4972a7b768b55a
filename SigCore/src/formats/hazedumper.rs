//! Hazedumper offset dumps
//!
//! Hazedumper publishes its scan configuration (`config.json`) and the
//! offsets it resolved (`csgo.json`). Both are shown next to the signature
//! list, so they get the same search treatment as signatures.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Scan configuration resource.
pub const CONFIG_RESOURCE: &str = "config.json";

/// Resolved offsets resource.
pub const OFFSETS_RESOURCE: &str = "csgo.json";

/// A pattern scan entry from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazeSignature {
    pub name: String,
    #[serde(default)]
    pub extra: i64,
    #[serde(default)]
    pub relative: bool,
    pub module: String,
    #[serde(default)]
    pub offsets: Vec<i64>,
    pub pattern: String,
}

impl HazeSignature {
    /// Match against an already lower-cased query.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        query.is_empty()
            || self.name.to_lowercase().contains(query)
            || self.module.to_lowercase().contains(query)
            || self.pattern.to_lowercase().contains(query)
            || format_offsets(&self.offsets).to_lowercase().contains(query)
    }
}

/// A network variable lookup from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetVar {
    pub name: String,
    pub prop: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub table: String,
}

impl NetVar {
    /// Match against an already lower-cased query.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        query.is_empty()
            || self.name.to_lowercase().contains(query)
            || self.prop.to_lowercase().contains(query)
            || self.table.to_lowercase().contains(query)
    }
}

/// The whole `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub executable: String,
    pub filename: String,
    #[serde(default)]
    pub signatures: Vec<HazeSignature>,
    #[serde(default)]
    pub netvars: Vec<NetVar>,
}

/// The whole `csgo.json`. Maps keep file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offsets {
    /// Unix timestamp of the dump
    pub timestamp: i64,
    #[serde(default)]
    pub signatures: IndexMap<String, i64>,
    #[serde(default)]
    pub netvars: IndexMap<String, i64>,
}

/// Which map of `csgo.json` an offset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetKind {
    Signature,
    NetVar,
}

/// One resolved offset, flattened out of [`Offsets`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetEntry {
    pub kind: OffsetKind,
    pub name: String,
    pub value: i64,
}

impl OffsetEntry {
    /// Match against an already lower-cased query.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        query.is_empty()
            || self.name.to_lowercase().contains(query)
            || format_offset(self.value).to_lowercase().contains(query)
    }
}

impl Offsets {
    /// All offsets, signatures first, each group in file order.
    #[must_use]
    pub fn entries(&self) -> Vec<OffsetEntry> {
        let signatures = self.signatures.iter().map(|(name, value)| OffsetEntry {
            kind: OffsetKind::Signature,
            name: name.clone(),
            value: *value,
        });
        let netvars = self.netvars.iter().map(|(name, value)| OffsetEntry {
            kind: OffsetKind::NetVar,
            name: name.clone(),
            value: *value,
        });
        signatures.chain(netvars).collect()
    }
}

/// Parse `config.json`.
pub fn parse_config(text: &str) -> Result<Config> {
    Ok(serde_json::from_str(text)?)
}

/// Parse `csgo.json`.
pub fn parse_offsets(text: &str) -> Result<Offsets> {
    Ok(serde_json::from_str(text)?)
}

/// Format an offset as `0x`-prefixed upper-case hex, at least two digits.
#[must_use]
pub fn format_offset(value: i64) -> String {
    if value < 0 {
        format!("-0x{:02X}", value.unsigned_abs())
    } else {
        format!("0x{value:02X}")
    }
}

/// Format an offset chain as `0x01 -> 0x2C`.
#[must_use]
pub fn format_offsets(offsets: &[i64]) -> String {
    offsets
        .iter()
        .map(|offset| format_offset(*offset))
        .collect::<Vec<_>>()
        .join(" -> ")
}
