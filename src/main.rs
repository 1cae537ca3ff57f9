use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use git_release::cli::{passthrough, ReleaseSettings, ReleaseWorkflow};
use git_release::config;
use git_release::domain::BumpKind;
use git_release::git::Git2Repository;
use git_release::tools::ProcessRunner;
use git_release::ui::{self, TerminalPrompter};
use git_release::ReleaseError;

#[derive(Parser)]
#[command(
    name = "git-release",
    version,
    about = "Test, version-bump, tag and push a Python package release"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long,
        global = true,
        help = "Run as if started in this directory"
    )]
    directory: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run tests, bump the manifest version, commit, tag and push
    Release {
        #[arg(default_value = "patch", help = "Version component to bump: patch, minor or major")]
        kind: String,
    },
    /// Install dependencies with the configured package manager
    Install,
    /// Run the test suite
    Test,
    /// Run the test suite with a coverage report
    TestCoverage,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        report(&err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn report(err: &anyhow::Error) {
    let release_err = err.downcast_ref::<ReleaseError>();
    if release_err.is_some_and(ReleaseError::is_user_abort) {
        ui::display_error(&format!("Release stopped, nothing was pushed. {}", err));
        return;
    }

    ui::display_error(&err.to_string());
    for cause in err.chain().skip(1) {
        ui::display_error(&format!("  caused by: {}", cause));
    }

    if let Some(ReleaseError::ExternalTool { output, .. }) = release_err {
        ui::display_tool_output(output);
    }
}

fn run(cli: Cli) -> Result<()> {
    let base_dir = match cli.directory {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let config = config::load_config(cli.config.as_deref(), &base_dir)?;
    let tools = ProcessRunner::new(&base_dir);

    match cli.command {
        Commands::Release { kind } => {
            let kind: BumpKind = kind.parse()?;

            let repo = Git2Repository::open(&base_dir)
                .with_context(|| format!("no git repository at {}", base_dir.display()))?;
            let prompter = TerminalPrompter::new();
            let settings = ReleaseSettings::from_config(&config, &base_dir);

            let outcome = ReleaseWorkflow::new(&repo, &tools, &prompter, settings).run(kind)?;
            ui::display_release_complete(&outcome.version, &outcome.branch, &outcome.remote);
        }
        Commands::Install => passthrough::install(&tools, &config.commands)?,
        Commands::Test => passthrough::test(&tools, &config.commands)?,
        Commands::TestCoverage => passthrough::test_coverage(&tools, &config.commands)?,
    }

    Ok(())
}
