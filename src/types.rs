//! Core types used throughout the project.

use serde::Serialize;

/// Completion status of a translation entry.
///
/// `Finished` entries are the only ones returned by lookups. `Unfinished`
/// entries exist in the file but have no usable translation yet.
/// `Vanished` entries are no longer referenced by current UI code and are
/// kept only for statistics and round-tripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageStatus {
    /// Translation is present and usable.
    #[default]
    Finished,
    /// Translation is missing or marked `type="unfinished"`.
    Unfinished,
    /// Source string no longer exists (`type="vanished"` or the older
    /// `type="obsolete"` spelling).
    Vanished,
}

impl MessageStatus {
    /// Parse the `type` attribute of a `<translation>` element.
    ///
    /// An absent attribute means finished. Unknown values are treated as
    /// unfinished so that a typo never surfaces a half-translated string.
    #[must_use]
    pub fn from_type_attr(attr: Option<&str>) -> Self {
        match attr {
            None => Self::Finished,
            Some("vanished" | "obsolete") => Self::Vanished,
            Some(_) => Self::Unfinished,
        }
    }

    /// Attribute value to emit when writing, `None` for finished entries.
    #[must_use]
    pub const fn type_attr(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
        }
    }

    /// Lowercase name for human-readable output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::Unfinished => "unfinished",
            Self::Vanished => "vanished",
        }
    }
}

/// A `<location filename=... line=.../>` hint attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    /// Source file the string was extracted from.
    pub filename: String,
    /// 1-based line number in that file.
    pub line: u32,
}
