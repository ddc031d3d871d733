// Locales and localized text
//
// The journal API answers with plain strings when a `locale` query
// parameter is sent, and with a `{ "en_US": "...", ... }` map otherwise.
// `LocalizedText` accepts both shapes and always resolves through the
// `en_US` fallback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Market/language code accepted by the data API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Locale {
    #[default]
    #[serde(rename = "ko_KR")]
    #[strum(serialize = "ko_KR")]
    KoKr,
    #[serde(rename = "en_US")]
    #[strum(serialize = "en_US")]
    EnUs,
    #[serde(rename = "zh_TW")]
    #[strum(serialize = "zh_TW")]
    ZhTw,
    #[serde(rename = "zh_CN")]
    #[strum(serialize = "zh_CN")]
    ZhCn,
    #[serde(rename = "ja_JP")]
    #[strum(serialize = "ja_JP")]
    JaJp,
    #[serde(rename = "de_DE")]
    #[strum(serialize = "de_DE")]
    DeDe,
    #[serde(rename = "es_ES")]
    #[strum(serialize = "es_ES")]
    EsEs,
    #[serde(rename = "fr_FR")]
    #[strum(serialize = "fr_FR")]
    FrFr,
    #[serde(rename = "it_IT")]
    #[strum(serialize = "it_IT")]
    ItIt,
    #[serde(rename = "pt_BR")]
    #[strum(serialize = "pt_BR")]
    PtBr,
    #[serde(rename = "ru_RU")]
    #[strum(serialize = "ru_RU")]
    RuRu,
}

impl Locale {
    /// Locale consulted when the requested one has no text.
    pub const FALLBACK: Self = Self::EnUs;

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Name of the language in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::KoKr => "한국어",
            Self::EnUs => "English",
            Self::ZhTw => "繁體中文",
            Self::ZhCn => "简体中文",
            Self::JaJp => "日本語",
            Self::DeDe => "Deutsch",
            Self::EsEs => "Español",
            Self::FrFr => "Français",
            Self::ItIt => "Italiano",
            Self::PtBr => "Português",
            Self::RuRu => "Русский",
        }
    }

    /// Every supported locale, in menu order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// Text that may come pre-localized or as a per-locale map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// Already localized by the server.
    Single(String),
    /// Keyed by locale code. Codes outside [`Locale`] (`en_GB`, `es_MX`, …)
    /// are kept but never selected.
    Localized(BTreeMap<String, String>),
}

impl LocalizedText {
    /// Resolve the text for `locale`, falling back to [`Locale::FALLBACK`].
    ///
    /// Empty strings count as missing.
    pub fn get(&self, locale: Locale) -> Option<&str> {
        match self {
            Self::Single(text) => Some(text.as_str()),
            Self::Localized(map) => {
                let pick = |l: Locale| {
                    map.get(l.as_str())
                        .map(String::as_str)
                        .filter(|s| !s.is_empty())
                };
                pick(locale).or_else(|| pick(Locale::FALLBACK))
            }
        }
    }

    /// Like [`get`](Self::get) but never empty-handed.
    pub fn get_or_default(&self, locale: Locale) -> &str {
        self.get(locale).unwrap_or("")
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        Self::Single(s.to_owned())
    }
}

impl From<String> for LocalizedText {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}
