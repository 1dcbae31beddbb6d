use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

pub const ARG_STORE: &str = "store";
pub const ARG_SESSION_STORE: &str = "session-store";
pub const ARG_INSTANT: &str = "instant";

pub const DEFAULT_STORE: &str = "noma-local.json";
pub const DEFAULT_SESSION_STORE: &str = "noma-session.json";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_STORE)
                .long("store")
                .help("JSON file used as local storage (users, floating position, session keys)")
                .default_value(DEFAULT_STORE)
                .env("NOMA_STORE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_SESSION_STORE)
                .long("session-store")
                .help("JSON file used as session storage")
                .default_value(DEFAULT_SESSION_STORE)
                .env("NOMA_SESSION_STORE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_INSTANT)
                .long("instant")
                .help("Skip the simulated latency and redirect delays")
                .env("NOMA_INSTANT")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}
