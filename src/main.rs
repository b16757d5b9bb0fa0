use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use release_preflight::cli::{run_release, ReleaseArgs};
use release_preflight::config;
use release_preflight::ui;

#[derive(Debug, clap::Parser)]
#[command(
    name = "release-preflight",
    version,
    about = "Check release preconditions, tag the release and run lifecycle hooks"
)]
struct Args {
    /// Version to release (e.g. 1.2.3 or v1.2.3)
    #[arg(value_name = "VERSION", required_unless_present = "list_hooks")]
    target_version: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Check preconditions without running hooks or making changes")]
    dry_run: bool,

    #[arg(long, help = "Show configured lifecycle hooks and exit")]
    list_hooks: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    debug!("parsed cli arguments: {:?}", args);

    if args.list_hooks {
        let config = match config::load_config(args.config.as_deref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        };
        ui::display_configured_hooks(&config.hooks);
        return Ok(());
    }

    let release_args = ReleaseArgs {
        config_path: args.config,
        version: args.target_version.unwrap_or_default(),
        dry_run: args.dry_run,
    };

    match run_release(&release_args) {
        Ok(report) => {
            ui::display_release_summary(&report);
            Ok(())
        }
        Err(err) => {
            ui::display_release_error(&err);
            std::process::exit(err.exit_code());
        }
    }
}
