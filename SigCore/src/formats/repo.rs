//! Repo header parsing
//!
//! The repo keeps all patterns in a single header, grouped by module:
//!
//! ```text
//! namespace "client" {
//!     CreateMove = "55 8B EC 83 E4 F8";
//!     ...
//! }
//! ```
//!
//! The namespace name, lower-cased, becomes the `file_name` of every record
//! in its body. Line numbers count from the start of the whole header.

use crate::compact::NameCompactor;

use super::types::Signature;

/// Header published by the repo.
pub const DEFAULT_RESOURCE: &str = "function_signatures.h";

/// Marker stored in `Signature::source` for records merged in from the repo.
pub const SOURCE_MARKER: &str = "repo";

const NAMESPACE_TAG: &str = "namespace \"";

/// Byte range of a namespace body, exclusive of its braces.
struct Body {
    start: usize,
    end: usize,
}

/// Tracks the line number of increasing byte offsets without rescanning.
struct LineCursor {
    pos: usize,
    line: usize,
}

impl LineCursor {
    fn line_at(&mut self, text: &str, pos: usize) -> usize {
        self.line += text[self.pos..pos].matches('\n').count();
        self.pos = pos;
        self.line
    }
}

/// Find the balanced `{ ... }` body following a namespace tag.
///
/// The opening brace must come before the next namespace tag, otherwise
/// the tag has no body of its own.
fn find_body(text: &str, from: usize) -> Option<Body> {
    let rest = &text[from..];
    let open = rest.find('{')?;
    if rest.find(NAMESPACE_TAG).is_some_and(|next_tag| next_tag < open) {
        return None;
    }

    let start = from + open + 1;
    let mut depth: usize = 1;
    for (at, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(Body { start, end: start + at });
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse one line of a namespace body.
///
/// A record has exactly one `=`; the trimmed text before it is the name and
/// the first double-quoted string after it is the pattern.
pub fn parse_line(
    file_name: &str,
    line: &str,
    line_nr: usize,
    compactor: &NameCompactor,
) -> Option<Signature> {
    let (name, rest) = line.split_once('=')?;
    if rest.contains('=') {
        return None;
    }

    let sig_name = name.trim();
    if sig_name.is_empty() {
        return None;
    }

    let quote_start = rest.find('"')? + 1;
    let quote_len = rest[quote_start..].find('"')?;
    let pattern = rest[quote_start..quote_start + quote_len].trim();

    Some(Signature {
        file_name: file_name.to_string(),
        line_nr,
        sig_name: sig_name.to_string(),
        sig_name_compact: compactor.compact_sig_name(sig_name),
        pattern: pattern.to_string(),
        source: None,
        class_info: None,
    })
}

fn parse_namespace(
    file_name: &str,
    body: &str,
    first_line: usize,
    compactor: &NameCompactor,
) -> Vec<Signature> {
    body.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let parsed = parse_line(file_name, line, first_line + index, compactor);
            if parsed.is_none() && !line.trim().is_empty() {
                tracing::trace!("{}:{}: dropping line {:?}", file_name, first_line + index, line);
            }
            parsed
        })
        .collect()
}

/// Parse the whole repo header.
///
/// A tag without a body (no `{`, or braces that never balance) is skipped
/// and scanning resumes after the tag. A name with no closing quote ends
/// the scan.
pub fn parse_file(text: &str, compactor: &NameCompactor) -> Vec<Signature> {
    let mut sigs = Vec::new();
    let mut cursor = LineCursor { pos: 0, line: 0 };
    let mut offset = 0;

    while let Some(found) = text[offset..].find(NAMESPACE_TAG) {
        let name_start = offset + found + NAMESPACE_TAG.len();
        let Some(name_len) = text[name_start..].find('"') else {
            tracing::warn!("Unterminated namespace name at byte {}", name_start);
            break;
        };
        let name_end = name_start + name_len;
        let name = text[name_start..name_end].to_lowercase();
        offset = name_end + 1;

        let Some(body) = find_body(text, offset) else {
            tracing::warn!("Namespace \"{}\" has no balanced body, skipping", name);
            continue;
        };

        let first_line = cursor.line_at(text, body.start);
        let parsed = parse_namespace(&name, &text[body.start..body.end], first_line, compactor);
        tracing::debug!("Parsed {} repo signatures from namespace {}", parsed.len(), name);
        sigs.extend(parsed);

        offset = body.end + 1;
    }

    sigs
}
