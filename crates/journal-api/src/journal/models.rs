// Journal API response types
//
// Field sets follow the `journal-expansion`, `journal-instance` and
// `journal-encounter` documents. Everything the viewer does not strictly
// need is optional or defaulted so partial documents still decode.

use serde::{Deserialize, Serialize};

use crate::locale::{Locale, LocalizedText};

// ── Shared pieces ───────────────────────────────────────────────────

/// `{ "href": "https://..." }` link to the full document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRef {
    pub href: String,
}

/// Back-reference to another entity (`{ key, name, id }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyRef>,
}

/// Anything that is only a name (`location`, `area`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Named {
    pub name: LocalizedText,
}

/// Map the instance takes place on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRef {
    pub id: u64,
    pub name: LocalizedText,
}

/// Media or creature-display asset reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyRef>,
}

/// Instance/encounter category (`{ "type": "RAID" }`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryKind {
    Dungeon,
    Raid,
    WorldBoss,
    Event,
    #[serde(other)]
    Other,
}

/// A difficulty mode and its group size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceMode {
    pub mode: ModeType,
    #[serde(default)]
    pub players: u32,
    #[serde(default)]
    pub is_tracked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeType {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: LocalizedText,
}

// ── Expansions ──────────────────────────────────────────────────────

/// One entry of the expansion index (`tiers[]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    pub id: u64,
    pub name: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyRef>,
}

/// `GET /data/wow/journal-expansion/index`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpansionIndex {
    #[serde(default)]
    pub tiers: Option<Vec<Expansion>>,
}

// ── Instances ───────────────────────────────────────────────────────

/// `GET /data/wow/journal-instance/index`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceIndex {
    #[serde(default)]
    pub instances: Option<Vec<Reference>>,
}

/// `GET /data/wow/journal-instance/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: u64,
    pub name: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<MapRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<Named>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub encounters: Vec<Encounter>,
    pub expansion: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Named>,
    #[serde(default)]
    pub modes: Vec<InstanceMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_level: Option<u32>,
    pub category: Category,
}

impl Instance {
    pub fn name_in(&self, locale: Locale) -> &str {
        self.name.get_or_default(locale)
    }
}

/// Encounter summary embedded in an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub id: u64,
    pub name: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyRef>,
}

// ── Encounters ──────────────────────────────────────────────────────

/// `GET /data/wow/journal-encounter/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterDetail {
    pub id: u64,
    pub name: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub creatures: Vec<Creature>,
    #[serde(default)]
    pub items: Vec<EncounterItem>,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub instance: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub modes: Vec<InstanceMode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: u64,
    pub name: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creature_display: Option<MediaRef>,
}

/// Loot entry. `quantity` is absent for ordinary drops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterItem {
    pub item: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

/// Node of the encounter's ability/strategy tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: u64,
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_text: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creature_display: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spell: Option<Reference>,
}

impl Section {
    /// Whether this node describes a specific ability.
    pub fn is_ability(&self) -> bool {
        self.spell.is_some()
    }
}
