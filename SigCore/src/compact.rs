//! Bracket-aware compaction of template names
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Signature dumps carry fully expanded C++ template names such as
//! `CUtlVector<CHandle<C_BaseEntity>>::AddToTail`. For display, the content
//! of long bracket spans at a chosen nesting depth is replaced with a short
//! placeholder, giving `CUtlVector<[...]>::AddToTail`. The full name is
//! always kept next to the compact one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A pair of matching bracket characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketPair {
    /// `<` and `>`
    #[default]
    Angle,
    /// `(` and `)`
    Round,
    /// `{` and `}`
    Curly,
    /// `[` and `]`
    Square,
}

impl BracketPair {
    /// The opening bracket character.
    #[must_use]
    pub const fn open(self) -> char {
        match self {
            BracketPair::Angle => '<',
            BracketPair::Round => '(',
            BracketPair::Curly => '{',
            BracketPair::Square => '[',
        }
    }

    /// The closing bracket character.
    #[must_use]
    pub const fn close(self) -> char {
        match self {
            BracketPair::Angle => '>',
            BracketPair::Round => ')',
            BracketPair::Curly => '}',
            BracketPair::Square => ']',
        }
    }

    fn is_bracket(self, ch: char) -> bool {
        ch == self.open() || ch == self.close()
    }
}

impl fmt::Display for BracketPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.open(), self.close())
    }
}

impl FromStr for BracketPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "angle" | "<>" => Ok(BracketPair::Angle),
            "round" | "()" => Ok(BracketPair::Round),
            "curly" | "{}" => Ok(BracketPair::Curly),
            "square" | "[]" => Ok(BracketPair::Square),
            _ => Err(format!(
                "Invalid bracket pair '{s}'. Valid values: angle/<>, round/(), curly/{{}}, square/[]"
            )),
        }
    }
}

/// Check that brackets never close below depth zero and all of them close.
fn is_balanced(text: &str, pair: BracketPair) -> bool {
    let mut depth: usize = 0;
    for ch in text.chars() {
        if ch == pair.open() {
            depth += 1;
        } else if ch == pair.close() {
            match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            }
        }
    }
    depth == 0
}

/// Replace long bracket spans at `target_depth` with `placeholder`.
///
/// Only spans whose brackets sit exactly at `target_depth` (1 = outermost)
/// are candidates, and only when their inner text is at least
/// `min_inner_length` characters long. The brackets themselves are kept:
/// `map<std::string,int>` becomes `map<[...]>`. Both `target_depth` and
/// `min_inner_length` are clamped to at least 1.
///
/// Returns the input unchanged when it has no brackets of `pair` or no span
/// qualifies, and `None` when the brackets are unbalanced. Callers tell a
/// no-op from a change by comparing strings.
///
/// # Example
/// ```
/// use sigcore::compact::{compact_brackets, BracketPair};
///
/// let out = compact_brackets("Foo<Bar<int>, Baz>", BracketPair::Angle, 1, "[...]", 5);
/// assert_eq!(out.as_deref(), Some("Foo<[...]>"));
///
/// assert_eq!(compact_brackets("Foo<int", BracketPair::Angle, 1, "[...]", 5), None);
/// ```
#[must_use]
pub fn compact_brackets(
    text: &str,
    pair: BracketPair,
    target_depth: usize,
    placeholder: &str,
    min_inner_length: usize,
) -> Option<String> {
    let target_depth = target_depth.max(1);
    let min_inner_length = min_inner_length.max(1);

    if !text.chars().any(|ch| pair.is_bracket(ch)) {
        return Some(text.to_string());
    }
    if !is_balanced(text, pair) {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    // Byte offset into `text` up to which content has been copied to `out`.
    let mut copied = 0;
    let mut depth: usize = 0;
    let mut span_start: Option<usize> = None;

    for (at, ch) in text.char_indices() {
        if ch == pair.open() {
            depth += 1;
            if depth == target_depth {
                span_start = Some(at);
            }
        } else if ch == pair.close() {
            if depth == target_depth {
                if let Some(open_at) = span_start.take() {
                    // Bracket characters are ASCII, so +1 is the next char boundary.
                    let inner = &text[open_at + 1..at];
                    if inner.chars().count() >= min_inner_length {
                        out.push_str(&text[copied..=open_at]);
                        out.push_str(placeholder);
                        copied = at;
                    }
                }
            }
            depth -= 1;
        }
    }

    out.push_str(&text[copied..]);
    Some(out)
}

/// Settings used to derive compact display names for signatures and classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCompactor {
    /// Bracket pair whose spans get compacted.
    pub pair: BracketPair,
    /// Nesting depth of compacted spans (1 = outermost).
    pub target_depth: usize,
    /// Replacement text for a compacted span.
    pub placeholder: String,
    /// Minimum inner length, in characters, for a span to be compacted.
    pub min_inner_length: usize,
    /// Display name used when brackets are unbalanced.
    pub invalid_marker: String,
    /// Prefix dropped from signature names (not class names) before compaction.
    pub strip_prefix: Option<String>,
}

impl Default for NameCompactor {
    fn default() -> Self {
        Self {
            pair: BracketPair::Angle,
            target_depth: 1,
            placeholder: "[...]".to_string(),
            min_inner_length: 10,
            invalid_marker: "INVALID".to_string(),
            strip_prefix: Some("virtual ".to_string()),
        }
    }
}

impl NameCompactor {
    /// Compact `text`, substituting the invalid marker for unbalanced input.
    #[must_use]
    pub fn compact(&self, text: &str) -> String {
        compact_brackets(
            text,
            self.pair,
            self.target_depth,
            &self.placeholder,
            self.min_inner_length,
        )
        .unwrap_or_else(|| self.invalid_marker.clone())
    }

    /// Compact display name for a signature, `None` when it equals `name`.
    ///
    /// Drops the configured prefix, cuts names with an opening bracket but
    /// no closing bracket anywhere (broken template dumps) at the opening
    /// bracket, then compacts.
    #[must_use]
    pub fn compact_sig_name(&self, name: &str) -> Option<String> {
        let mut omitted = name;

        if let Some(rest) = self
            .strip_prefix
            .as_deref()
            .and_then(|prefix| omitted.strip_prefix(prefix))
        {
            omitted = rest;
        }

        if let Some(start) = omitted.find(self.pair.open()) {
            if !omitted.contains(self.pair.close()) {
                omitted = &omitted[..start];
            }
        }

        let compacted = self.compact(omitted);
        (compacted != name).then_some(compacted)
    }

    /// Compact display name for a class, `None` when it equals `name`.
    #[must_use]
    pub fn compact_class_name(&self, name: &str) -> Option<String> {
        let compacted = self.compact(name);
        (compacted != name).then_some(compacted)
    }
}
