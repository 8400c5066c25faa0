use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use console_kernel::config::ConsoleConfig;
use console_kernel::console::{ActionOutcome, Console, ConsoleAction, Tab};
use console_kernel::controller::CollectionController;
use console_kernel::draft::EditorMode;
use console_kernel::entity::account::Account;
use console_kernel::entity::role::Role;
use console_kernel::entity::{Entity, Record, RecordId};

/// Admin Console CLI
#[derive(Parser, Debug)]
#[command(name = "console")]
#[command(about = "Account and role administration console (scripted)", long_about = None)]
struct Cli {
    /// Path to console config JSON (seed records)
    #[arg(long)]
    config: Option<String>,

    /// Path to a JSON array of console actions to apply in order
    #[arg(long)]
    script: Option<String>,

    /// Log at debug level
    #[arg(long, short)]
    verbose: bool,
}

/// What the rendering layer would show for one collection.
#[derive(Debug, Serialize)]
struct CollectionReport<'a, E: Entity> {
    rows: Vec<&'a Record<E>>,
    no_data: bool,
    editor: EditorMode,
    errors: serde_json::Value,
    pending_removal: Option<RecordId>,
}

impl<'a, E: Entity> CollectionReport<'a, E> {
    fn from_controller(controller: &'a CollectionController<E>) -> Result<Self> {
        let rows = controller.view();
        Ok(Self {
            no_data: rows.is_empty(),
            rows,
            editor: controller.editor_mode(),
            errors: serde_json::to_value(controller.editor().errors())?,
            pending_removal: controller.pending_removal(),
        })
    }
}

/// Wrapper for JSON output
#[derive(Debug, Serialize)]
struct CliOutput<'a> {
    tab: Tab,
    outcomes: Vec<ActionOutcome>,
    accounts: CollectionReport<'a, Account>,
    roles: CollectionReport<'a, Role>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    // ----------------------------
    // Load config
    // ----------------------------
    let config = if let Some(path) = &cli.config {
        let data = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        ConsoleConfig::from_json(&data)?
    } else {
        ConsoleConfig::default_seed()
    };

    let mut console = Console::from_config(&config)?;

    // ----------------------------
    // Load script
    // ----------------------------
    let actions: Vec<ConsoleAction> = match &cli.script {
        Some(path) => {
            let data = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&data).with_context(|| format!("parsing {path}"))?
        }
        None => Vec::new(),
    };

    // ----------------------------
    // Apply actions
    // ----------------------------
    let mut outcomes = Vec::with_capacity(actions.len());
    for (index, action) in actions.into_iter().enumerate() {
        tracing::debug!(index, ?action, "applying action");
        let outcome = console
            .apply(action)
            .with_context(|| format!("action {index} failed"))?;
        outcomes.push(outcome);
    }

    // ----------------------------
    // Output
    // ----------------------------
    let output = CliOutput {
        tab: console.tab(),
        outcomes,
        accounts: CollectionReport::from_controller(console.accounts())?,
        roles: CollectionReport::from_controller(console.roles())?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("console_kernel=debug,console=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });

    // stdout carries the JSON report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
