//! Instance command handlers.

use std::fmt::Write;

use tabled::Tabled;

use journal_core::{Instance, InstanceKind, Journal, Locale, categorize};

use crate::cli::{GlobalOpts, InstancesArgs, InstancesCommand, KindArg};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct InstanceRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: InstanceKind,
    #[tabled(rename = "Encounters")]
    encounters: usize,
    #[tabled(rename = "Min Level")]
    minimum_level: String,
}

impl InstanceRow {
    fn new(i: &Instance, locale: Locale) -> Self {
        Self {
            id: i.id,
            name: util::text(&i.name, locale),
            kind: InstanceKind::of(i),
            encounters: i.encounters.len(),
            minimum_level: i.minimum_level.map(|l| l.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct EncounterRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Encounter")]
    name: String,
}

impl From<KindArg> for InstanceKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Dungeon => InstanceKind::Dungeon,
            KindArg::Raid => InstanceKind::Raid,
            KindArg::Other => InstanceKind::Other,
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

/// Multi-line description of one instance and its encounter list.
pub fn instance_detail(i: &Instance, locale: Locale, painter: Painter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", painter.title(&util::text(&i.name, locale)));

    let field = |out: &mut String, label: &str, value: String| {
        let _ = writeln!(out, "  {} {value}", painter.label(&format!("{label:<12}")));
    };
    field(&mut out, "ID", i.id.to_string());
    field(&mut out, "Kind", InstanceKind::of(i).to_string());
    field(
        &mut out,
        "Expansion",
        util::opt_text(i.expansion.name.as_ref(), locale),
    );
    if let Some(ref location) = i.location {
        field(&mut out, "Location", util::text(&location.name, locale));
    }
    if let Some(level) = i.minimum_level {
        field(&mut out, "Min level", level.to_string());
    }
    if !i.modes.is_empty() {
        let modes = i
            .modes
            .iter()
            .map(|m| format!("{} ({})", util::text(&m.mode.name, locale), m.players))
            .collect::<Vec<_>>()
            .join(", ");
        field(&mut out, "Modes", modes);
    }
    if let Some(ref description) = i.description {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", util::indent(&util::text(description, locale), 2));
    }

    let _ = writeln!(out);
    if i.encounters.is_empty() {
        let _ = write!(out, "{}", painter.dim("No encounters listed."));
    } else {
        let rows: Vec<EncounterRow> = i
            .encounters
            .iter()
            .map(|e| EncounterRow {
                id: e.id,
                name: util::text(&e.name, locale),
            })
            .collect();
        let _ = write!(out, "{}", output::render_table(&rows));
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    journal: &Journal,
    args: InstancesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let locale = journal.locale();
    match args.command {
        InstancesCommand::List { expansion, kind } => {
            let spinner = util::spinner(global, format!("Loading instances of expansion {expansion}…"));
            let result = journal.instances_for(expansion).await;
            spinner.finish_and_clear();
            let instances = result?;

            let groups = categorize(&instances);
            let selected: Vec<&Instance> = match kind {
                Some(kind) => groups.group(kind.into()).to_vec(),
                None => groups
                    .dungeons
                    .iter()
                    .chain(&groups.raids)
                    .chain(&groups.other)
                    .copied()
                    .collect(),
            };

            if selected.is_empty() && !global.quiet {
                eprintln!("No instances found for expansion {expansion}");
            }

            let out = output::render_list(
                global.output,
                &selected,
                |i| InstanceRow::new(i, locale),
                |i| i.id.to_string(),
            )?;
            output::print_output(&out, global.quiet)?;
            Ok(())
        }

        InstancesCommand::Show { id } => {
            let instance = journal.instance(id).await?;
            let painter = Painter::new(global.color);
            let out = output::render_single(
                global.output,
                &instance,
                |i| instance_detail(i, locale, painter),
                |i| {
                    i.encounters
                        .iter()
                        .map(|e| e.id.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?;
            output::print_output(&out, global.quiet)?;
            Ok(())
        }
    }
}
