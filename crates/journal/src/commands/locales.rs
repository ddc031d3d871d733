//! `journal locales`: the fixed locale set with native names.

use serde::Serialize;
use tabled::Tabled;

use journal_core::Locale;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Clone, Copy, Serialize, Tabled)]
struct LocaleRow {
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Language")]
    name: &'static str,
    #[tabled(rename = "")]
    note: &'static str,
}

impl From<Locale> for LocaleRow {
    fn from(locale: Locale) -> Self {
        let note = if locale == Locale::default() {
            "default"
        } else if locale == Locale::FALLBACK {
            "fallback"
        } else {
            ""
        };
        Self {
            code: locale.as_str(),
            name: locale.native_name(),
            note,
        }
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let rows: Vec<LocaleRow> = Locale::all().map(LocaleRow::from).collect();
    let out = output::render_list(
        global.output,
        &rows,
        |r| *r,
        |r| r.code.to_owned(),
    )?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}
