//! Draft subcommands: inspect, push and discard local draft records.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use rendizy_core::draft::controller::DraftPersistenceController;
use rendizy_core::draft::discard::DraftDiscardHelper;
use rendizy_core::draft::recovery::DraftRecoveryReader;
use rendizy_core::draft::store::DraftStore;
use rendizy_core::draft::target::SaveTarget;
use rendizy_infra::http::HttpSaveTarget;
use rendizy_types::config::AutoSaveConfig;
use rendizy_types::draft::{DraftKey, SaveOutcome};

use crate::state::AppState;

#[derive(Subcommand)]
pub enum DraftCommand {
    /// List local drafts.
    #[command(alias = "ls")]
    List,

    /// Print a local draft.
    Show {
        /// Entity id (`draft` for a property not created yet).
        entity: String,
    },

    /// Save a local draft to the configured remote endpoint.
    Push {
        /// Entity id.
        entity: String,

        /// Delete the local draft once the push succeeded.
        #[arg(long)]
        discard: bool,
    },

    /// Delete a local draft.
    #[command(alias = "rm")]
    Discard {
        /// Entity id.
        entity: String,
    },
}

pub async fn handle_draft_command(cmd: DraftCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        DraftCommand::List => list_drafts(state, json),
        DraftCommand::Show { entity } => show_draft(state, &entity, json),
        DraftCommand::Push { entity, discard } => push_draft(state, &entity, discard, json).await,
        DraftCommand::Discard { entity } => discard_draft(state, &entity, json),
    }
}

struct DraftRow {
    entity: String,
    key: String,
    size: u64,
    modified: Option<DateTime<Local>>,
}

fn file_info(path: &Path) -> (u64, Option<DateTime<Local>>) {
    match std::fs::metadata(path) {
        Ok(meta) => (meta.len(), meta.modified().ok().map(DateTime::<Local>::from)),
        Err(_) => (0, None),
    }
}

fn list_drafts(state: &AppState, json: bool) -> Result<()> {
    let keys = state
        .store
        .list_keys()
        .with_context(|| format!("Failed to read {}", state.store.dir().display()))?;

    let rows: Vec<DraftRow> = keys
        .iter()
        .filter_map(|raw| DraftKey::parse(raw))
        .map(|key| {
            let (size, modified) = state
                .store
                .path_for(key.as_str())
                .map(|p| file_info(&p))
                .unwrap_or((0, None));
            DraftRow {
                entity: key.entity_id().to_string(),
                key: key.as_str().to_string(),
                size,
                modified,
            }
        })
        .collect();

    if json {
        let drafts: Vec<_> = rows
            .iter()
            .map(|r| {
                serde_json::json!({
                    "entity": r.entity,
                    "key": r.key,
                    "size": r.size,
                    "modified": r.modified.map(|t| t.to_rfc3339()),
                })
            })
            .collect();
        let result = serde_json::json!({ "drafts": drafts, "count": rows.len() });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!();
        println!("  {} No local drafts.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    println!();
    println!("  Local drafts ({} entries)", rows.len());
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Entity").fg(Color::White),
        Cell::new("Key").fg(Color::White),
        Cell::new("Size").fg(Color::White),
        Cell::new("Modified").fg(Color::White),
    ]);

    for row in &rows {
        let modified = row
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&row.entity).fg(Color::Cyan),
            Cell::new(&row.key).fg(Color::DarkGrey),
            Cell::new(format!("{} B", row.size)),
            Cell::new(modified),
        ]);
    }

    println!("{table}");
    println!();
    Ok(())
}

fn show_draft(state: &AppState, entity: &str, json: bool) -> Result<()> {
    let key = DraftKey::for_entity(Some(entity));
    let reader = DraftRecoveryReader::new(state.store.clone());

    let Some(draft) = reader.recover_raw(&key) else {
        if json {
            let result = serde_json::json!({ "key": key.as_str(), "draft": null });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!();
            println!(
                "  {} No readable draft for '{}'",
                style("i").blue().bold(),
                style(entity).cyan(),
            );
            println!();
        }
        return Ok(());
    };

    if json {
        let result = serde_json::json!({ "key": key.as_str(), "draft": draft });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!("  {} {}", style("Draft").bold(), style(key.as_str()).cyan());
        println!();
        println!("{}", serde_json::to_string_pretty(&draft)?);
        println!();
    }
    Ok(())
}

/// What a push did, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PushReport {
    outcome: SaveOutcome,
    discarded: bool,
}

/// Send the local draft under `key` to `target` through a controller.
///
/// Refuses new entities and empty (`null`) drafts. The local copy is only
/// discarded when requested and the remote now holds the draft.
async fn push_to<T, S>(
    key: &DraftKey,
    target: T,
    store: S,
    config: AutoSaveConfig,
    discard: bool,
) -> Result<PushReport>
where
    T: SaveTarget<serde_json::Value> + 'static,
    S: DraftStore + Clone + 'static,
{
    if key.is_new_entity() {
        bail!("Drafts of entities not created yet cannot be pushed");
    }

    let draft = DraftRecoveryReader::new(store.clone())
        .recover_raw(key)
        .with_context(|| format!("No readable draft for '{}'", key.entity_id()))?;
    if draft.is_null() {
        bail!("Draft for '{}' is empty", key.entity_id());
    }

    // Seeded with `null` so any non-empty draft is dirty and gets sent.
    let controller = DraftPersistenceController::new(
        key.clone(),
        serde_json::Value::Null,
        target,
        store.clone(),
        config.with_notify(false),
    )?;
    controller.update(draft);
    let outcome = controller.trigger_save().await;
    controller.dispose();

    let discarded =
        outcome.is_persisted() && discard && DraftDiscardHelper::new(store).discard(key);
    Ok(PushReport { outcome, discarded })
}

async fn push_draft(state: &AppState, entity: &str, discard: bool, json: bool) -> Result<()> {
    let Some(remote) = &state.config.remote else {
        bail!(
            "No remote endpoint configured; add a [remote] section to {}",
            state.data_dir.join("config.toml").display()
        );
    };

    let key = DraftKey::for_entity(Some(entity));
    let target = HttpSaveTarget::new(remote, key.entity_id());
    let PushReport { outcome, discarded } = push_to(
        &key,
        target,
        state.store.clone(),
        state.config.autosave.clone(),
        discard,
    )
    .await?;

    if json {
        let result = serde_json::json!({
            "key": key.as_str(),
            "outcome": outcome,
            "discarded": discarded,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        match outcome {
            SaveOutcome::Failed => println!(
                "  {} Could not save '{}'; the draft is kept locally",
                style("x").red().bold(),
                style(entity).cyan(),
            ),
            _ => println!(
                "  {} Saved '{}'{}",
                style("ok").green(),
                style(entity).cyan(),
                if discarded { " and discarded the local copy" } else { "" },
            ),
        }
        println!();
    }

    if outcome == SaveOutcome::Failed {
        bail!("Push failed for '{entity}'");
    }
    Ok(())
}

fn discard_draft(state: &AppState, entity: &str, json: bool) -> Result<()> {
    let key = DraftKey::for_entity(Some(entity));
    if !DraftDiscardHelper::new(state.store.clone()).discard(&key) {
        bail!("Failed to discard draft '{}'", key);
    }

    if json {
        let result = serde_json::json!({ "discarded": key.as_str() });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Discarded local draft for '{}'",
            style("ok").green(),
            style(entity).cyan(),
        );
        println!();
    }
    Ok(())
}
