//! Numerus (plural) form selection.
//!
//! Linguist catalogs store one `<numerusform>` per grammatical form of the
//! target language; which form applies for a given count is a property of
//! the language, not of the file. The groups below cover the languages the
//! catalogs ship for, with a Germanic two-form default for everything else.

use unic_langid::LanguageIdentifier;

/// Plural rule group for a target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
    /// One form for every count (ja, ko, zh, th, vi, id).
    Single,
    /// Two forms, singular only at exactly 1 (en, de, it, nl, ...).
    Dual,
    /// Two forms, singular at 0 and 1 (fr, pt_BR, tr).
    DualFromTwo,
    /// Three forms, East Slavic grouping (ru, uk, be, sr, hr, bs).
    Slavic,
    /// Three forms, Polish grouping.
    Polish,
    /// Three forms, Czech/Slovak grouping.
    CzechSlovak,
}

impl PluralRule {
    /// Rule for a language, keyed by its primary subtag.
    #[must_use]
    pub fn for_language(language: &LanguageIdentifier) -> Self {
        match language.language.as_str() {
            "ja" | "ko" | "zh" | "th" | "vi" | "id" => Self::Single,
            "fr" | "tr" => Self::DualFromTwo,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::Slavic,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::CzechSlovak,
            _ => Self::Dual,
        }
    }

    /// Number of `<numerusform>` entries a complete message carries.
    #[must_use]
    pub const fn form_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Dual | Self::DualFromTwo => 2,
            Self::Slavic | Self::Polish | Self::CzechSlovak => 3,
        }
    }

    /// Index of the form to use for a count of `n`.
    ///
    /// Always less than [`form_count`](Self::form_count).
    #[must_use]
    pub const fn select(self, n: u64) -> usize {
        match self {
            Self::Single => 0,
            Self::Dual => {
                if n == 1 { 0 } else { 1 }
            }
            Self::DualFromTwo => {
                if n <= 1 { 0 } else { 1 }
            }
            Self::Slavic => {
                if n % 10 == 1 && n % 100 != 11 {
                    0
                } else if matches!(n % 10, 2..=4) && !matches!(n % 100, 12..=14) {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if matches!(n % 10, 2..=4) && !matches!(n % 100, 12..=14) {
                    1
                } else {
                    2
                }
            }
            Self::CzechSlovak => {
                if n == 1 {
                    0
                } else if matches!(n, 2..=4) {
                    1
                } else {
                    2
                }
            }
        }
    }
}
