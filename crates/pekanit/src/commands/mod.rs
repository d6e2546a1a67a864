//! Command dispatch: bridges CLI args -> core workflows -> output formatting.

pub mod antrian;
pub mod config_cmd;
pub mod kuesioner;
pub mod report;
pub mod session;
pub mod util;

use pekanit_core::Portal;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    portal: &Portal,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => session::login(portal, args, global).await,
        Command::Antrian(args) => antrian::handle(portal, args, global).await,
        Command::Kuesioner(args) => kuesioner::student(portal, args, global).await,
        Command::Tamu(args) => kuesioner::guest(portal, args, global).await,
        Command::Report(args) => report::handle(portal, args, config, global).await,
        // Handled before a portal is built
        Command::Logout
        | Command::Status
        | Command::Config(_)
        | Command::Completions(_) => unreachable!(),
    }
}
