//! notechain CLI: sequential note identifiers for literature and
//! Zettelkasten chains.
//!
//! Commands: init, new, next, touch, config, completions

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use serde::Serialize;
use tracing::{debug, Level};

use notechain_core::chain::{self, NotePlan};
use notechain_core::template::stamp;
use notechain_core::{NoteConfig, NoteKind};
use notechain_vault::{config_path, Vault};

#[derive(Parser)]
#[command(name = "notechain")]
#[command(version)]
#[command(about = "Sequential note identifiers for literature and Zettelkasten chains")]
struct Cli {
    /// Vault root directory
    #[arg(long, global = true, default_value = ".")]
    vault: PathBuf,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Initialize a vault
    Init {
        /// Directory to initialize (defaults to --vault)
        dir: Option<PathBuf>,
    },
    /// Start a new chain
    New {
        kind: KindArg,

        /// Print the planned note without creating it
        #[arg(long)]
        dry_run: bool,
    },
    /// Continue a chain from an existing note
    Next {
        /// Path of the note to continue, absolute or relative to the vault
        source: PathBuf,

        /// Print the planned note without creating it
        #[arg(long)]
        dry_run: bool,
    },
    /// Set updated_at of a note to the current time
    Touch {
        /// Path of the note, absolute or relative to the vault
        note: PathBuf,
    },
    /// Print the resolved vault configuration
    Config,
    /// Print a shell completion script
    Completions { shell: Shell },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    #[value(alias = "lit")]
    Literature,
    #[value(alias = "zk")]
    Zettelkasten,
}

impl From<KindArg> for NoteKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Literature => NoteKind::Literature,
            KindArg::Zettelkasten => NoteKind::Zettelkasten,
        }
    }
}

#[derive(Serialize)]
struct NoteOutput<'a> {
    #[serde(flatten)]
    plan: &'a NotePlan,
    path: String,
    created: bool,
}

#[derive(Serialize)]
struct VaultOutput<'a> {
    root: String,
    config_file: String,
    #[serde(flatten)]
    config: &'a NoteConfig,
}

#[derive(Serialize)]
struct TouchOutput {
    path: String,
    updated_at: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { dir } => {
            let dir = dir.unwrap_or(cli.vault);
            let vault = Vault::init(&dir)
                .with_context(|| format!("failed to initialize vault at {}", dir.display()))?;
            print_json(&vault_output(&vault))
        }
        Commands::New { kind, dry_run } => {
            let vault = open_vault(&cli.vault)?;
            let plan = chain::plan_first(&vault, vault.config(), kind.into(), &now())?;
            finish(&vault, &plan, dry_run)
        }
        Commands::Next { source, dry_run } => {
            let vault = open_vault(&cli.vault)?;
            let source = vault.resolve_note(&source).with_context(|| {
                format!("failed to locate source note {}", source.display())
            })?;
            debug!(folder = %source.folder, basename = %source.basename, "resolved source");
            let plan = chain::plan_next(&vault, vault.config(), &source, &now())?;
            finish(&vault, &plan, dry_run)
        }
        Commands::Touch { note } => {
            let vault = open_vault(&cli.vault)?;
            let note = vault
                .resolve_note(&note)
                .with_context(|| format!("failed to locate note {}", note.display()))?;
            let updated_at = stamp(&now());
            vault.touch(&note, &updated_at)?;
            print_json(&TouchOutput {
                path: vault.absolute_path(&note).display().to_string(),
                updated_at,
            })
        }
        Commands::Config => {
            let vault = open_vault(&cli.vault)?;
            print_json(&vault_output(&vault))
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "notechain", &mut io::stdout());
            Ok(())
        }
    }
}

fn open_vault(root: &Path) -> Result<Vault> {
    Vault::open(root).with_context(|| format!("failed to open vault at {}", root.display()))
}

fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

fn finish(vault: &Vault, plan: &NotePlan, dry_run: bool) -> Result<()> {
    if !dry_run {
        chain::create(vault, plan)?;
    }
    print_json(&NoteOutput {
        plan,
        path: vault.absolute_path(&plan.handle()).display().to_string(),
        created: !dry_run,
    })
}

fn vault_output(vault: &Vault) -> VaultOutput<'_> {
    VaultOutput {
        root: vault.root().display().to_string(),
        config_file: config_path(vault.root()).display().to_string(),
        config: vault.config(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
