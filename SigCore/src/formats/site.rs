//! Site dump parsing
//!
//! The site publishes one raw dump per module (`client_funcs.c`,
//! `engine_funcs.c`, ...). Every line is a record:
//!
//! ```text
//! name=pattern[=source[=class_name=vtable_index]]
//! ```
//!
//! Lines with fewer than two fields are comments or blank and are skipped.

use crate::compact::NameCompactor;

use super::types::{ClassInfo, Signature};

/// Field separator used by site dumps.
pub const FIELD_SEPARATOR: char = '=';

/// Suffix shared by all site dump resource names.
pub const RESOURCE_SUFFIX: &str = "_funcs.c";

/// Resources published by the site, one per game module.
pub const DEFAULT_RESOURCES: [&str; 6] = [
    "client_funcs.c",
    "engine_funcs.c",
    "server_funcs.c",
    "filesystem_stdio_funcs.c",
    "panorama_funcs.c",
    "panoramauiclient_funcs.c",
];

/// Derive the module name from a resource name or path.
///
/// `rawsigdata/client_funcs.c` becomes `client`. Names without the dump
/// suffix lose their extension instead.
#[must_use]
pub fn file_name_from_resource(resource: &str) -> String {
    let base = resource.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(resource);
    if let Some(module) = base.strip_suffix(RESOURCE_SUFFIX) {
        return module.to_string();
    }
    match base.rfind('.') {
        Some(dot) if dot > 0 => base[..dot].to_string(),
        _ => base.to_string(),
    }
}

/// Parse a vtable index, decimal or `0x`-prefixed hexadecimal.
fn parse_vtable_index(text: &str) -> Option<u32> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Parse one line of a site dump.
///
/// Returns `None` for lines that are not records. A line whose vtable index
/// is not a number is treated as malformed and dropped as a whole.
pub fn parse_line(
    file_name: &str,
    line: &str,
    line_nr: usize,
    compactor: &NameCompactor,
) -> Option<Signature> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = line.split(FIELD_SEPARATOR);

    let sig_name = fields.next()?;
    let pattern = fields.next()?;
    let source = fields.next().filter(|s| !s.is_empty());

    let class_info = match (fields.next(), fields.next()) {
        (Some(class_name), Some(index)) => {
            let Some(vtable_index) = parse_vtable_index(index) else {
                tracing::trace!(
                    "{}:{}: dropping line with bad vtable index {:?}",
                    file_name,
                    line_nr,
                    index
                );
                return None;
            };
            Some(ClassInfo {
                name: class_name.to_string(),
                name_compact: compactor.compact_class_name(class_name),
                vtable_index,
            })
        }
        _ => None,
    };

    Some(Signature {
        file_name: file_name.to_string(),
        line_nr,
        sig_name: sig_name.to_string(),
        sig_name_compact: compactor.compact_sig_name(sig_name),
        pattern: pattern.to_string(),
        source: source.map(str::to_string),
        class_info,
    })
}

/// Parse a whole site dump. `line_nr` is the zero-based line index.
pub fn parse_file(file_name: &str, text: &str, compactor: &NameCompactor) -> Vec<Signature> {
    let sigs: Vec<Signature> = text
        .lines()
        .enumerate()
        .filter_map(|(line_nr, line)| {
            let parsed = parse_line(file_name, line, line_nr, compactor);
            if parsed.is_none() && !line.contains(FIELD_SEPARATOR) && !line.trim().is_empty() {
                tracing::trace!("{}:{}: dropping line without separator", file_name, line_nr);
            }
            parsed
        })
        .collect();

    tracing::debug!("Parsed {} site signatures from {}", sigs.len(), file_name);
    sigs
}
