// journal-core: Drill-down state between journal-api and its consumers.

pub mod catalog;
pub mod config;
pub mod error;
pub mod journal;
pub mod sections;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::{Categorized, InstanceKind, categorize};
pub use config::JournalConfig;
pub use error::CoreError;
pub use journal::Journal;
pub use sections::{abilities, walk_sections};

// Wire types are part of this crate's surface.
pub use journal_api::models::{
    Creature, Encounter, EncounterDetail, EncounterItem, Expansion, Instance, InstanceMode,
    Reference, Section,
};
pub use journal_api::{ApiHosts, Credentials, Locale, LocalizedText, Region, TlsMode};
