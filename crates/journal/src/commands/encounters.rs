//! Encounter command handlers.

use std::fmt::Write;

use tabled::Tabled;

use journal_core::{EncounterDetail, Journal, Locale, Section, abilities, walk_sections};

use crate::cli::{EncountersArgs, EncountersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AbilityRow {
    #[tabled(rename = "Spell ID")]
    spell_id: u64,
    #[tabled(rename = "Ability")]
    title: String,
    #[tabled(rename = "Spell")]
    spell: String,
}

impl AbilityRow {
    fn new(s: &Section, locale: Locale) -> Self {
        let spell = s.spell.as_ref();
        Self {
            spell_id: spell.map_or(0, |r| r.id),
            title: util::text(&s.title, locale),
            spell: util::opt_text(spell.and_then(|r| r.name.as_ref()), locale),
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

fn section_lines(out: &mut String, sections: &[Section], locale: Locale, painter: Painter) {
    for (depth, section) in walk_sections(sections) {
        let pad = "  ".repeat(depth + 1);
        let title = util::text(&section.title, locale);
        match section.spell {
            Some(ref spell) => {
                let spell_name = util::opt_text(spell.name.as_ref(), locale);
                let _ = writeln!(
                    out,
                    "{pad}{} {}",
                    painter.spell(&format!("⚡ {title}")),
                    painter.dim(&format!("[spell {} {spell_name}]", spell.id)),
                );
            }
            None => {
                let _ = writeln!(out, "{pad}{}", painter.label(&title));
            }
        }
        if let Some(body) = section.body_text.as_ref().and_then(|b| b.get(locale)) {
            let _ = writeln!(out, "{}", util::indent(body, pad.len() + 2));
        }
    }
}

/// Multi-line description of one encounter: creatures, section tree, loot.
pub fn encounter_detail(e: &EncounterDetail, locale: Locale, painter: Painter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", painter.title(&util::text(&e.name, locale)));
    let _ = writeln!(
        out,
        "  {} {}",
        painter.label(&format!("{:<12}", "Instance")),
        util::opt_text(e.instance.name.as_ref(), locale)
    );
    if let Some(ref description) = e.description {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", util::indent(&util::text(description, locale), 2));
    }

    if !e.creatures.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", painter.title("Creatures"));
        for creature in &e.creatures {
            let _ = writeln!(
                out,
                "  • {} {}",
                util::text(&creature.name, locale),
                painter.dim(&format!("({})", creature.id))
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", painter.title("Abilities"));
    if e.sections.is_empty() {
        let _ = writeln!(out, "  {}", painter.dim("No ability information for this encounter."));
    } else {
        section_lines(&mut out, &e.sections, locale, painter);
    }

    if !e.items.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", painter.title("Loot"));
        for entry in &e.items {
            let quantity = entry
                .quantity
                .map(|q| format!(" ×{q}"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  • {}{quantity} {}",
                util::opt_text(entry.item.name.as_ref(), locale),
                painter.dim(&format!("({})", entry.item.id))
            );
        }
    }

    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    journal: &Journal,
    args: EncountersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let locale = journal.locale();
    match args.command {
        EncountersCommand::Show { id, abilities_only } => {
            let detail = journal.encounter(id).await?;

            let out = if abilities_only {
                let found: Vec<&Section> = abilities(&detail.sections).collect();
                output::render_list(
                    global.output,
                    &found,
                    |s| AbilityRow::new(s, locale),
                    |s| s.spell.as_ref().map_or(0, |r| r.id).to_string(),
                )?
            } else {
                let painter = Painter::new(global.color);
                output::render_single(
                    global.output,
                    &detail,
                    |e| encounter_detail(e, locale, painter),
                    |e| e.id.to_string(),
                )?
            };
            output::print_output(&out, global.quiet)?;
            Ok(())
        }
    }
}
