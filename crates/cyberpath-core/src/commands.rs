use std::io::{self, BufRead, Write};

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::cli::Invocation;
use crate::config::Config;
use crate::datastore::DataStore;
use crate::filter::Filter;
use crate::messages;
use crate::ops::{self, AppState, Notice};
use crate::render::Renderer;
use crate::task::{Category, Task};

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "add",
        "list",
        "toggle",
        "edit",
        "delete",
        "clear",
        "path",
        "paths",
        "language",
        "theme",
        "subscribe",
        "help",
        "version",
    ]
}

/// Exact names win; otherwise a token expands to the single command it
/// unambiguously prefixes.
pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

#[instrument(skip(store, cfg, state, renderer, inv))]
pub fn dispatch(
    store: &DataStore,
    cfg: &Config,
    state: &mut AppState,
    renderer: &mut Renderer,
    inv: Invocation,
) -> anyhow::Result<()> {
    let now = Utc::now();
    let command = inv.command.as_str();

    debug!(
        command,
        filter = ?inv.filter_terms,
        args = ?inv.command_args,
        "dispatching command"
    );

    match command {
        "add" => cmd_add(store, state, renderer, &inv.command_args, now),
        "list" => cmd_list(state, renderer, &inv.filter_terms, &inv.command_args, now),
        "toggle" => cmd_toggle(store, state, renderer, &inv.command_args),
        "edit" => cmd_edit(store, state, renderer, &inv.command_args),
        "delete" => cmd_delete(store, state, renderer, &inv.command_args),
        "clear" => cmd_clear(store, cfg, state, renderer),
        "path" => cmd_path(state, renderer, &inv.command_args),
        "paths" => renderer.print_paths_overview(state.prefs.language),
        "language" => cmd_language(store, state, renderer),
        "theme" => cmd_theme(store, state, renderer),
        "subscribe" => cmd_subscribe(store, state, renderer, &inv.command_args),
        "help" => {
            println!("{}", messages::help(state.prefs.language));
            Ok(())
        }
        "version" => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => Err(anyhow!("unknown command: {other}")),
    }
}

#[instrument(skip(store, state, renderer, args, now))]
fn cmd_add(
    store: &DataStore,
    state: &mut AppState,
    renderer: &Renderer,
    args: &[String],
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    info!("command add");

    let (category_arg, text_args) = args
        .split_first()
        .ok_or_else(|| anyhow!("add requires a category and task text"))?;
    let category: Category = category_arg.parse()?;
    let text = text_args.join(" ");

    let notice = ops::add_task(state, &text, category, now);
    persist_if_changed(store, state, &notice)?;
    renderer.print_notice(&notice)
}

#[instrument(skip(state, renderer, filter_terms, args, now))]
fn cmd_list(
    state: &AppState,
    renderer: &Renderer,
    filter_terms: &[String],
    args: &[String],
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    info!("command list");

    if state.tasks.is_empty() {
        return renderer.print_empty_state(state.prefs.language);
    }

    let mut terms = filter_terms.to_vec();
    terms.extend(args.iter().cloned());
    let filter = Filter::parse(&terms)?;

    // Stored order is already newest-first; rendering keeps it.
    let rows: Vec<Task> = state
        .tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect();

    renderer.print_task_table(&rows, state.prefs.language, now)
}

#[instrument(skip(store, state, renderer, args))]
fn cmd_toggle(
    store: &DataStore,
    state: &mut AppState,
    renderer: &Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command toggle");

    let id = parse_id_arg(args, "toggle")?;
    let notice = ops::toggle_task(state, id);
    persist_if_changed(store, state, &notice)?;
    renderer.print_notice(&notice)
}

#[instrument(skip(store, state, renderer, args))]
fn cmd_edit(
    store: &DataStore,
    state: &mut AppState,
    renderer: &Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command edit");

    let (id_arg, text_args) = args
        .split_first()
        .ok_or_else(|| anyhow!("edit requires a task id and replacement text"))?;
    let id: u64 = id_arg
        .parse()
        .with_context(|| format!("invalid task id: {id_arg}"))?;

    let notice = ops::edit_task(state, id, &text_args.join(" "));
    persist_if_changed(store, state, &notice)?;
    renderer.print_notice(&notice)
}

#[instrument(skip(store, state, renderer, args))]
fn cmd_delete(
    store: &DataStore,
    state: &mut AppState,
    renderer: &Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command delete");

    let id = parse_id_arg(args, "delete")?;
    let notice = ops::delete_task(state, id);
    persist_if_changed(store, state, &notice)?;
    renderer.print_notice(&notice)
}

#[instrument(skip(store, cfg, state, renderer))]
fn cmd_clear(
    store: &DataStore,
    cfg: &Config,
    state: &mut AppState,
    renderer: &Renderer,
) -> anyhow::Result<()> {
    info!("command clear");

    let language = state.prefs.language;
    let count = ops::completed_count(state);
    if count == 0 {
        return renderer.print_notice(&Notice::info(messages::nothing_to_clear(language)));
    }

    let needs_confirmation = cfg.get_bool("confirmation").unwrap_or(true);
    if needs_confirmation && !confirm(&messages::confirm_clear(language, count))? {
        debug!("clear aborted by user");
        return Ok(());
    }

    let notice = ops::clear_completed(state);
    persist_if_changed(store, state, &notice)?;
    renderer.print_notice(&notice)
}

#[instrument(skip(state, renderer, args))]
fn cmd_path(state: &AppState, renderer: &Renderer, args: &[String]) -> anyhow::Result<()> {
    info!("command path");

    let language = state.prefs.language;
    let key = args
        .first()
        .ok_or_else(|| anyhow!("path requires a career-path key"))?;

    match Category::parse(key) {
        Some(category) => renderer.print_path_details(category, language),
        // Unknown keys fall back to echoing the raw key, not an error.
        None => renderer.print_notice(&Notice::info(messages::path_not_found(language, key))),
    }
}

#[instrument(skip(store, state, renderer))]
fn cmd_language(
    store: &DataStore,
    state: &mut AppState,
    renderer: &Renderer,
) -> anyhow::Result<()> {
    info!("command language");

    let language = state.prefs.toggle_language(store)?;
    renderer.print_notice(&Notice::success(messages::language_switched(language)))
}

#[instrument(skip(store, state, renderer))]
fn cmd_theme(
    store: &DataStore,
    state: &mut AppState,
    renderer: &mut Renderer,
) -> anyhow::Result<()> {
    info!("command theme");

    let theme = state.prefs.toggle_theme(store)?;
    renderer.set_theme(theme);
    renderer.print_notice(&Notice::success(messages::theme_switched(
        state.prefs.language,
        theme,
    )))
}

#[instrument(skip(store, state, renderer, args))]
fn cmd_subscribe(
    store: &DataStore,
    state: &AppState,
    renderer: &Renderer,
    args: &[String],
) -> anyhow::Result<()> {
    info!("command subscribe");

    let language = state.prefs.language;
    let email = args.join(" ");
    let email = email.trim();
    if email.is_empty() {
        return renderer.print_notice(&Notice::error(messages::empty_email(language)));
    }

    store.append_subscriber(email)?;
    renderer.print_notice(&Notice::success(messages::subscribe_thanks(language)))
}

fn persist_if_changed(
    store: &DataStore,
    state: &AppState,
    notice: &Notice,
) -> anyhow::Result<()> {
    if notice.changed_state() {
        store.save_tasks(&state.tasks)?;
    }
    Ok(())
}

fn parse_id_arg(args: &[String], command: &str) -> anyhow::Result<u64> {
    let raw = args
        .first()
        .ok_or_else(|| anyhow!("{command} requires a task id"))?;
    raw.parse()
        .with_context(|| format!("invalid task id: {raw}"))
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let mut out = io::stdout().lock();
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed reading confirmation")?;

    let answer = answer.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes" | "نعم"))
}
