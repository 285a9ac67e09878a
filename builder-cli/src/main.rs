//! # Site Builder CLI
//!
//! Replays editor command scripts and writes the website export.

use std::path::PathBuf;

use builder_cli::{palette_json, run_apply, ReplayConfig};
use builder_core::history::DEFAULT_HISTORY_LIMIT;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "site-builder", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Apply a JSON command script to a fresh site and export it.
    Apply {
        /// Path to a JSON array of commands.
        script: PathBuf,

        /// Directory to write website-export.json into.
        #[arg(long, env = "SITE_BUILDER_OUT_DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Maximum number of undo steps kept while replaying.
        #[arg(long, env = "SITE_BUILDER_HISTORY_LIMIT", default_value_t = DEFAULT_HISTORY_LIMIT)]
        history_limit: usize,
    },
    /// Print the default element of every palette kind.
    Palette,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,builder_core=debug"));

    // Logs go to stderr so stdout stays machine-readable.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Action::Apply {
            script,
            out_dir,
            history_limit,
        } => {
            let summary = run_apply(
                &script,
                &out_dir,
                ReplayConfig { history_limit },
                chrono::Utc::now(),
            )?;
            if !summary.rejected.is_empty() {
                tracing::warn!(
                    "{} of {} commands had no effect",
                    summary.rejected.len(),
                    summary.applied + summary.rejected.len()
                );
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Action::Palette => {
            println!("{}", palette_json()?);
        }
    }
    Ok(())
}
