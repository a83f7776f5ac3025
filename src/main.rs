use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use iocraft::prelude::*;

use jira_board::app::App;
use jira_board::color::ColorDepth;
use jira_board::config::loader;
use jira_board::config::types::{AppConfig, GridOptions};
use jira_board::engine::{Engine, JiraEngine};
use jira_board::fields::FIELD_DISPLAY_NAMES;
use jira_board::grid::IssueGrid;
use jira_board::jira::{JiraClient, auth};
use jira_board::theme::{Background, ResolvedTheme};

#[derive(Parser)]
#[command(name = "jira-board", version, about = "Jira issue grid for the terminal")]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to debug.log.
    #[arg(long)]
    debug: bool,

    /// Only mount the grid with this id (default: every configured grid).
    #[arg(short, long, value_name = "ID")]
    grid: Option<String>,

    #[command(flatten)]
    overrides: OverrideArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options applied on top of every mounted grid.
#[derive(clap::Args)]
struct OverrideArgs {
    /// JQL query to run.
    #[arg(long)]
    jql: Option<String>,

    /// Comma-separated field ids to display.
    #[arg(long, value_delimiter = ',')]
    fields: Option<Vec<String>>,

    /// Maximum number of issues to fetch.
    #[arg(long)]
    max_results: Option<u32>,

    /// Grid title.
    #[arg(long)]
    title: Option<String>,

    /// Field to sort by (ascending) after the first load.
    #[arg(long)]
    sort_by: Option<String>,

    /// Rows per page.
    #[arg(long)]
    page_size: Option<usize>,
}

impl From<OverrideArgs> for GridOptions {
    fn from(args: OverrideArgs) -> Self {
        GridOptions {
            title: args.title,
            jql: args.jql,
            fields: args.fields,
            max_results: args.max_results,
            sort_by: args.sort_by,
            page_size: args.page_size,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the Jira connection and credentials.
    Check,
    /// List the field ids with dedicated column labels.
    Fields,
}

fn mount_grids(config: &AppConfig, only: Option<&str>, overrides: &GridOptions) -> Result<Vec<IssueGrid>> {
    let targets: Vec<String> = match only {
        Some(id) => vec![id.to_owned()],
        None => config.grid_sections().into_iter().map(|s| s.id).collect(),
    };
    targets
        .iter()
        .map(|id| {
            IssueGrid::mount(config, id, overrides.clone())
                .with_context(|| format!("mounting grid \"{id}\""))
        })
        .collect()
}

fn run_check(config: &AppConfig) -> Result<()> {
    let client = JiraClient::new(&config.jira, auth::provider_for(&config.jira))?;
    let rt = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let summary = rt
        .block_on(client.check())
        .with_context(|| format!("connecting to {}", client.base_url()))?;
    println!("{summary}");
    Ok(())
}

fn main() -> Result<()> {
    // Install a panic hook that writes to a file, since the fullscreen TUI
    // swallows stderr.
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("{info}\n\n{backtrace}");
        let _ = std::fs::write("panic.log", &msg);
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();

    // Set up tracing.
    if cli.debug {
        let file = std::fs::File::create("debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    if let Some(Commands::Fields) = cli.command {
        for (id, label) in FIELD_DISPLAY_NAMES {
            println!("{id:<12} {label}");
        }
        return Ok(());
    }

    // Load config.
    let config = loader::load_config(cli.config.as_deref())?;

    if let Some(Commands::Check) = cli.command {
        return run_check(&config);
    }

    let overrides = GridOptions::from(cli.overrides);
    let grids = mount_grids(&config, cli.grid.as_deref(), &overrides)?;

    // Detect terminal capabilities.
    let color_depth = ColorDepth::detect();
    let background = Background::detect();
    let theme = ResolvedTheme::resolve(&config.theme, background);

    // Start the Jira backend engine in a dedicated OS thread (owns its own
    // Tokio runtime). Dropping `engine_handle` at the end of `main` closes the
    // sender channel, signalling the engine to shut down.
    let credentials = auth::provider_for(&config.jira);
    let engine_handle = JiraEngine::new(config.jira.clone(), credentials).start();

    tracing::info!("jira-board starting with {} grid(s)", grids.len());

    // Enter fullscreen TUI (iocraft uses smol internally).
    smol::block_on(
        element! {
            App(
                config: &config,
                grids: grids.as_slice(),
                engine: &engine_handle,
                theme: &theme,
                color_depth,
            )
        }
        .fullscreen(),
    )?;

    Ok(())
}
