pub mod core;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::core::config::{validate_config, MirrorConfig};
use crate::core::sync::{render_only, run_sync, SyncOutcome};
use crate::core::AppServices;

#[derive(Debug, Parser)]
#[command(name = "blog-mirror", version, about = "Mirror a blog RSS feed into a static page")]
struct Cli {
    /// Log stage details (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only posts in this category are recorded.
    #[arg(long, global = true)]
    category: Option<String>,
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    #[arg(long, global = true)]
    html_file: Option<PathBuf>,
    #[arg(long, global = true)]
    sitemap_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand, PartialEq, Eq)]
enum Command {
    /// Fetch the feed, record new posts and regenerate the site (default).
    Sync,
    /// Regenerate the page and sitemap from the stored record only.
    Render,
    /// Print service readiness.
    Health,
}

impl Cli {
    fn apply_overrides(&self, config: &mut MirrorConfig) {
        if let Some(category) = &self.category {
            config.category = category.clone();
        }
        if let Some(path) = &self.data_file {
            config.data_file = path.clone();
        }
        if let Some(path) = &self.html_file {
            config.html_file = path.clone();
        }
        if let Some(path) = &self.sitemap_file {
            config.sitemap_file = path.clone();
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Command::Sync);
    if command == Command::Health {
        for (name, status) in AppServices::default().health_report() {
            println!("{name}: {status}");
        }
        return ExitCode::SUCCESS;
    }

    let mut config = match MirrorConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut config);
    if let Err(error) = validate_config(&config) {
        tracing::error!("invalid configuration: {error}");
        return ExitCode::FAILURE;
    }

    let result = match command {
        Command::Render => render_only(&config).map(|_| ()),
        _ => {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(error) => {
                    tracing::error!("failed to start runtime: {error}");
                    return ExitCode::FAILURE;
                }
            };
            runtime.block_on(run_sync(&config)).map(|outcome| match outcome {
                SyncOutcome::Completed(report) => {
                    tracing::debug!(?report, "sync finished");
                }
                SyncOutcome::FetchFailed { status } => {
                    tracing::debug!(status, "sync halted after fetch failure");
                }
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("sync failed: {error}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config_paths_and_category() {
        let cli = Cli::parse_from([
            "blog-mirror",
            "render",
            "--category",
            "Other",
            "--html-file",
            "public/index.html",
        ]);
        let mut config = MirrorConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(cli.command, Some(Command::Render));
        assert_eq!(config.category, "Other");
        assert_eq!(config.html_file, PathBuf::from("public/index.html"));
        assert_eq!(config.data_file, PathBuf::from("data/posts.json"));
    }

    #[test]
    fn sync_is_the_default_command() {
        let cli = Cli::parse_from(["blog-mirror", "--verbose"]);
        assert!(cli.verbose);
        assert_eq!(cli.command, None);
    }
}
