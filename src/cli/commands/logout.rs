use clap::{Arg, Command};

pub const CMD_LOGOUT: &str = "logout";
pub const CMD_PROBE: &str = "probe";

pub const ARG_PAGE_URL: &str = "page-url";
pub const ARG_LOGOUT_ENDPOINT: &str = "logout-endpoint";
pub const ARG_LOGIN_CANDIDATES: &str = "login-candidates";
pub const ARG_PROBE_TIMEOUT: &str = "probe-timeout-ms";

fn probe_args() -> [Arg; 3] {
    [
        Arg::new(ARG_PAGE_URL)
            .long("page-url")
            .help("URL of the page the user is on; candidates resolve against it")
            .env("NOMA_PAGE_URL")
            .required(true),
        Arg::new(ARG_LOGIN_CANDIDATES)
            .long("login-candidates")
            .help("Comma separated login locations, tried in order")
            .env("NOMA_LOGIN_CANDIDATES")
            .value_delimiter(','),
        Arg::new(ARG_PROBE_TIMEOUT)
            .long("probe-timeout-ms")
            .help("Per-probe timeout in milliseconds")
            .default_value("2200")
            .env("NOMA_PROBE_TIMEOUT_MS")
            .value_parser(clap::value_parser!(u64).range(1..)),
    ]
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_LOGOUT)
                .about("Clear the session and print a reachable login page")
                .args(probe_args())
                .arg(
                    Arg::new(ARG_LOGOUT_ENDPOINT)
                        .long("logout-endpoint")
                        .help("Server endpoint notified with a POST before clearing the session")
                        .env("NOMA_LOGOUT_ENDPOINT"),
                ),
        )
        .subcommand(
            Command::new(CMD_PROBE)
                .about("Find the first login candidate that answers")
                .args(probe_args()),
        )
}
