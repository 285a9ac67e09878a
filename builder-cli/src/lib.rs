//! # Site Builder CLI Library
//!
//! Script replay and export for the `site-builder` binary.
//! This library is used by both the binary and integration tests.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use builder_core::{palette, BuilderStore, Command, Element, ElementKind, StoreConfig};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Settings for one replay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Undo depth of the store the script runs against.
    pub history_limit: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            history_limit: StoreConfig::default().history_limit,
        }
    }
}

impl From<ReplayConfig> for StoreConfig {
    fn from(config: ReplayConfig) -> Self {
        Self {
            history_limit: config.history_limit,
        }
    }
}

/// A command the store refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Position of the command in the script.
    pub index: usize,
    /// Operation name.
    pub op: &'static str,
}

/// What a replay did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    /// Commands that changed the state.
    pub applied: usize,
    /// Commands that were refused or had nothing to do.
    pub rejected: Vec<Rejection>,
    /// Pages in the final state.
    pub pages: usize,
    /// Elements across all pages in the final state.
    pub elements: usize,
    /// Where the export was written, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// Read a JSON array of commands from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a command list.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<Command>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse_script(&raw).with_context(|| format!("Invalid script {}", path.display()))
}

/// Parse a JSON array of commands.
///
/// # Errors
///
/// Returns an error if `raw` is not a JSON array of commands.
pub fn parse_script(raw: &str) -> anyhow::Result<Vec<Command>> {
    let commands: Vec<Command> = serde_json::from_str(raw)?;
    Ok(commands)
}

/// Apply `commands` in order. Refused commands are logged and counted;
/// the replay carries on with the next one.
pub fn replay(store: &mut BuilderStore, commands: Vec<Command>) -> ReplaySummary {
    let mut applied = 0;
    let mut rejected = Vec::new();

    for (index, command) in commands.into_iter().enumerate() {
        let op = command.name();
        if store.dispatch(command) {
            applied += 1;
        } else {
            tracing::warn!(index, op, "Command had no effect");
            rejected.push(Rejection { index, op });
        }
    }

    ReplaySummary {
        applied,
        rejected,
        pages: store.pages().len(),
        elements: store.pages().iter().map(|p| p.elements().len()).sum(),
        output: None,
    }
}

/// Replay the script at `script` against a fresh store and write the
/// export into `out_dir`, stamped with `now`.
///
/// # Errors
///
/// Returns an error if the script cannot be loaded or the export cannot
/// be written.
pub fn run_apply(
    script: &Path,
    out_dir: &Path,
    config: ReplayConfig,
    now: DateTime<Utc>,
) -> anyhow::Result<ReplaySummary> {
    let commands = load_script(script)?;
    tracing::info!(
        commands = commands.len(),
        history_limit = config.history_limit,
        "Replaying {}",
        script.display()
    );

    let mut store = BuilderStore::with_config(config.into());
    let mut summary = replay(&mut store, commands);

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let path = store
        .export(now)
        .write_to(out_dir)
        .with_context(|| format!("Failed to write export into {}", out_dir.display()))?;
    summary.output = Some(path);
    Ok(summary)
}

/// The default element of every kind, in palette order.
#[must_use]
pub fn palette_defaults() -> Vec<Element> {
    ElementKind::ALL
        .iter()
        .copied()
        .map(palette::new_element)
        .collect()
}

/// [`palette_defaults`] as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn palette_json() -> anyhow::Result<String> {
    serde_json::to_string_pretty(&palette_defaults()).context("Failed to render palette")
}
