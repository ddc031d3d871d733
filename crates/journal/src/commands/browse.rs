//! `journal browse`: interactive drill-down.
//!
//! Signs in (prompting for credentials when none are configured), then
//! walks expansions → instances → encounters with arrow-key menus. Every
//! menu also offers a locale switch, which reloads the current path.

use dialoguer::{Input, Select};
use secrecy::SecretString;

use journal_core::{CoreError, InstanceKind, Journal, Locale, categorize};

use crate::cli::GlobalOpts;
use crate::config::Resolved;
use crate::error::CliError;
use crate::output::{Painter, print_output};

use super::encounters::encounter_detail;
use super::instances::instance_detail;
use super::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Expansions,
    Instances,
    Encounters,
}

enum Choice {
    Pick(usize),
    Back,
    Locale,
    Quit,
}

// ── Menus ───────────────────────────────────────────────────────────

fn choose(prompt: &str, items: &[String], can_go_back: bool) -> Result<Choice, CliError> {
    let mut entries = items.to_vec();
    if can_go_back {
        entries.push("← Back".into());
    }
    entries.push("Change locale".into());
    entries.push("Quit".into());

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&entries)
        .default(0)
        .max_length(20)
        .interact_opt()
        .map_err(util::prompt_err)?;

    let Some(index) = selection else {
        return Ok(if can_go_back { Choice::Back } else { Choice::Quit });
    };
    let extra = index.saturating_sub(items.len());
    Ok(match (index < items.len(), can_go_back, extra) {
        (true, _, _) => Choice::Pick(index),
        (false, true, 0) => Choice::Back,
        (false, true, 1) | (false, false, 0) => Choice::Locale,
        _ => Choice::Quit,
    })
}

fn choose_locale(current: Locale) -> Result<Option<Locale>, CliError> {
    let locales: Vec<Locale> = Locale::all().collect();
    let labels: Vec<String> = locales
        .iter()
        .map(|l| format!("{} ({l})", l.native_name()))
        .collect();
    let default = locales.iter().position(|l| *l == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Locale")
        .items(&labels)
        .default(default)
        .interact_opt()
        .map_err(util::prompt_err)?;
    Ok(selection.and_then(|i| locales.get(i).copied()))
}

fn prompt_credentials() -> Result<(String, SecretString), CliError> {
    let client_id: String = Input::new()
        .with_prompt("Client ID")
        .interact_text()
        .map_err(util::prompt_err)?;
    let secret = rpassword::prompt_password("Client secret: ").map_err(util::prompt_err)?;
    Ok((client_id, SecretString::from(secret)))
}

// ── Sign-in ─────────────────────────────────────────────────────────

/// Configured credentials are tried once. Prompted ones may be retried
/// after a rejection.
async fn sign_in(
    journal: &mut Journal,
    configured: Option<(String, SecretString)>,
    profile: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some((id, secret)) = configured {
        exchange(journal, &id, &secret, global)
            .await
            .map_err(|e| CliError::from(e).for_profile(profile))?;
        return Ok(());
    }

    eprintln!("No credentials configured. Enter an OAuth client from develop.battle.net.");
    loop {
        let (id, secret) = prompt_credentials()?;
        match exchange(journal, &id, &secret, global).await {
            Ok(()) => return Ok(()),
            Err(e @ (CoreError::AuthenticationFailed { .. } | CoreError::Configuration { .. })) => {
                eprintln!("✗ {e}");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// The network half of sign-in. The spinner never overlaps a prompt.
async fn exchange(
    journal: &mut Journal,
    id: &str,
    secret: &SecretString,
    global: &GlobalOpts,
) -> Result<(), CoreError> {
    let spinner = util::spinner(global, "Signing in…");
    let result = journal.sign_in(id, secret).await.map(|_| ());
    spinner.finish_and_clear();
    result
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(resolved: Resolved, global: &GlobalOpts) -> Result<(), CliError> {
    util::require_terminal("browse")?;

    let profile = resolved.profile_name;
    let mut config = resolved.journal;
    let configured = config
        .credentials
        .take()
        .map(|c| (c.client_id, c.client_secret));
    let mut journal = Journal::new(config).await?;
    let painter = Painter::new(global.color);

    sign_in(&mut journal, configured, &profile, global).await?;

    let mut screen = Screen::Expansions;
    loop {
        let locale = journal.locale();
        let next = match screen {
            Screen::Expansions => {
                let items: Vec<(u64, String)> = journal
                    .loaded_expansions()
                    .iter()
                    .map(|e| (e.id, util::text(&e.name, locale)))
                    .collect();
                let labels: Vec<String> = items.iter().map(|(_, l)| l.clone()).collect();
                match choose("Expansion", &labels, false)? {
                    Choice::Pick(i) => {
                        let (id, _) = &items[i];
                        let spinner = util::spinner(global, "Loading instances…");
                        let result = journal.select_expansion(*id).await.map(<[_]>::len);
                        spinner.finish_and_clear();
                        match result {
                            Ok(0) => {
                                eprintln!("No instances found for this expansion.");
                                Screen::Expansions
                            }
                            Ok(_) => Screen::Instances,
                            Err(e) => {
                                eprintln!("✗ {e}");
                                Screen::Expansions
                            }
                        }
                    }
                    Choice::Locale => change_locale(&mut journal, global).await?,
                    Choice::Back | Choice::Quit => return Ok(()),
                }
            }

            Screen::Instances => {
                let groups = categorize(journal.loaded_instances());
                let items: Vec<(u64, String)> = [InstanceKind::Dungeon, InstanceKind::Raid, InstanceKind::Other]
                    .into_iter()
                    .flat_map(|kind| {
                        groups.group(kind).iter().map(move |i| {
                            (i.id, format!("[{kind}] {}", util::text(&i.name, locale)))
                        })
                    })
                    .collect();
                let labels: Vec<String> = items.iter().map(|(_, l)| l.clone()).collect();
                match choose("Instance", &labels, true)? {
                    Choice::Pick(i) => {
                        let instance = journal.select_instance(items[i].0)?;
                        print_output(&instance_detail(instance, locale, painter), global.quiet)?;
                        Screen::Encounters
                    }
                    Choice::Back => Screen::Expansions,
                    Choice::Locale => change_locale(&mut journal, global).await?,
                    Choice::Quit => return Ok(()),
                }
            }

            Screen::Encounters => {
                let items: Vec<(u64, String)> = journal
                    .selected_instance()
                    .map(|i| {
                        i.encounters
                            .iter()
                            .map(|e| (e.id, util::text(&e.name, locale)))
                            .collect()
                    })
                    .unwrap_or_default();
                let labels: Vec<String> = items.iter().map(|(_, l)| l.clone()).collect();
                match choose("Encounter", &labels, true)? {
                    Choice::Pick(i) => {
                        let spinner = util::spinner(global, "Loading encounter…");
                        let result = journal.select_encounter(items[i].0).await;
                        spinner.finish_and_clear();
                        match result {
                            Ok(detail) => {
                                print_output(&encounter_detail(detail, locale, painter), global.quiet)?;
                            }
                            Err(e) => eprintln!("✗ {e}"),
                        }
                        Screen::Encounters
                    }
                    Choice::Back => Screen::Instances,
                    Choice::Locale => change_locale(&mut journal, global).await?,
                    Choice::Quit => return Ok(()),
                }
            }
        };

        // A locale reload may have dropped the selection under us.
        screen = match next {
            Screen::Encounters if journal.selected_instance().is_none() => Screen::Instances,
            Screen::Instances if journal.selected_expansion_id().is_none() => Screen::Expansions,
            other => other,
        };
    }
}

/// Switch locale and return the screen to continue on.
async fn change_locale(journal: &mut Journal, global: &GlobalOpts) -> Result<Screen, CliError> {
    if let Some(locale) = choose_locale(journal.locale())? {
        let spinner = util::spinner(global, "Reloading…");
        let result = journal.set_locale(locale).await;
        spinner.finish_and_clear();
        if let Err(e) = result {
            eprintln!("✗ {e}");
        }
    }
    Ok(if journal.selected_instance().is_some() {
        Screen::Encounters
    } else if journal.selected_expansion_id().is_some() {
        Screen::Instances
    } else {
        Screen::Expansions
    })
}
