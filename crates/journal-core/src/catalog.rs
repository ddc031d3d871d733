// Instance grouping for display
//
// The viewer shows an expansion's instances in two headed groups
// (dungeons, raids). Everything else (world bosses, events, categories
// the API adds later) lands in a third group so nothing is silently lost.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use journal_api::models::{CategoryKind, Instance};

/// Display group of an instance.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InstanceKind {
    Dungeon,
    Raid,
    Other,
}

impl InstanceKind {
    pub fn of(instance: &Instance) -> Self {
        match instance.category.kind {
            CategoryKind::Dungeon => Self::Dungeon,
            CategoryKind::Raid => Self::Raid,
            CategoryKind::WorldBoss | CategoryKind::Event | CategoryKind::Other => Self::Other,
        }
    }
}

/// Instances split by [`InstanceKind`], each group in input order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Categorized<'a> {
    pub dungeons: Vec<&'a Instance>,
    pub raids: Vec<&'a Instance>,
    pub other: Vec<&'a Instance>,
}

impl<'a> Categorized<'a> {
    pub fn group(&self, kind: InstanceKind) -> &[&'a Instance] {
        match kind {
            InstanceKind::Dungeon => &self.dungeons,
            InstanceKind::Raid => &self.raids,
            InstanceKind::Other => &self.other,
        }
    }
}

pub fn categorize(instances: &[Instance]) -> Categorized<'_> {
    let mut out = Categorized::default();
    for instance in instances {
        match InstanceKind::of(instance) {
            InstanceKind::Dungeon => out.dungeons.push(instance),
            InstanceKind::Raid => out.raids.push(instance),
            InstanceKind::Other => out.other.push(instance),
        }
    }
    out
}
