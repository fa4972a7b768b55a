//! Record types shared by every signature source

use serde::{Deserialize, Serialize};

/// Class and virtual-table metadata attached to a signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    /// Full class name (e.g., "CCSPlayer")
    pub name: String,
    /// Compacted class name, `None` when compaction changes nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_compact: Option<String>,
    /// Index of the function in the class's virtual table
    pub vtable_index: u32,
}

impl ClassInfo {
    /// Name to show to users: the compact name if there is one.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name_compact.as_deref().unwrap_or(&self.name)
    }

    /// Whether two class infos denote the same class.
    ///
    /// Compares display names, so two spellings that compact to the same
    /// text count as one class.
    #[must_use]
    pub fn is_same_class(&self, other: &ClassInfo) -> bool {
        self.display_name() == other.display_name()
    }
}

/// A named byte pattern from one of the signature dumps.
///
/// Both source layouts produce this type. Records from the repo header
/// never carry `class_info`, and get `source` only when merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Module the pattern belongs to (e.g., "client", "engine")
    pub file_name: String,
    /// Zero-based line in the originating dump, unique per file and source
    pub line_nr: usize,
    /// Full function or variable name as dumped
    pub sig_name: String,
    /// Compacted name, `None` when compaction changes nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig_name_compact: Option<String>,
    /// The byte pattern text (e.g., "55 8B EC ? ? 56")
    pub pattern: String,
    /// Provenance tag (e.g., "client.dll", or the merge marker)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Owning class and vtable slot, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_info: Option<ClassInfo>,
}

impl Signature {
    /// Name to show to users: the compact name if there is one.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.sig_name_compact.as_deref().unwrap_or(&self.sig_name)
    }

    /// Whether two records describe the same signature.
    ///
    /// File and name must match exactly. Class identity must agree too:
    /// both without class info, or both with the same class.
    #[must_use]
    pub fn is_same_signature(&self, other: &Signature) -> bool {
        if self.file_name != other.file_name || self.sig_name != other.sig_name {
            return false;
        }
        match (&self.class_info, &other.class_info) {
            (Some(lhs), Some(rhs)) => lhs.is_same_class(rhs),
            (None, None) => true,
            _ => false,
        }
    }
}
