mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pekanit_core::Portal;

use crate::cli::{AntrianArgs, AntrianCommand, Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "pekanit", &mut std::io::stdout());
            Ok(())
        }

        // Local session inspection works without a backend URL
        Command::Logout => {
            let cfg = config::load_config_or_default();
            commands::session::logout(&cfg, &cli.global)
        }
        Command::Status => {
            let cfg = config::load_config_or_default();
            commands::session::status(&cfg, &cli.global)
        }
        Command::Antrian(AntrianArgs {
            command: AntrianCommand::Classes,
        }) => commands::antrian::classes(&cli.global),

        // All other commands talk to the backend
        cmd => {
            let cfg = config::load_config_or_default();
            let client_config = config::client_config(&cli.global, &cfg)?;
            let portal = Portal::new(&client_config)?;

            tracing::debug!(command = ?cmd, api_url = %client_config.api_url, "dispatching command");
            commands::dispatch(cmd, &portal, &cfg, &cli.global).await
        }
    }
}
