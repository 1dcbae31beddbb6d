use clap::{Arg, ArgAction, Command};

pub const CMD_REGISTER: &str = "register";
pub const CMD_LOGIN: &str = "login";
pub const CMD_ADMIN_LOGIN: &str = "admin-login";
pub const CMD_USERS: &str = "users";

pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_USER: &str = "user";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_NO_LEGACY_ADMIN_BYPASS: &str = "no-legacy-admin-bypass";

// Fields are optional at the clap level: blank input is reported by the form
// itself, the same way the page does.
fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long("password")
        .help("Account password (stored in plaintext, demo only)")
        .env("NOMA_PASSWORD")
        .hide_env_values(true)
}

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long("email")
        .help("Email or username")
        .env("NOMA_EMAIL")
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_REGISTER)
                .about("Register a client account")
                .arg(
                    Arg::new(ARG_NAME)
                        .short('n')
                        .long("name")
                        .help("Display name")
                        .env("NOMA_NAME"),
                )
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Sign in and print the role destination")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new(CMD_ADMIN_LOGIN)
                .about("Sign in to the admin area")
                .arg(
                    Arg::new(ARG_USER)
                        .short('u')
                        .long("user")
                        .help("Admin email or name")
                        .env("NOMA_ADMIN_USER"),
                )
                .arg(password_arg())
                .arg(
                    Arg::new(ARG_NO_LEGACY_ADMIN_BYPASS)
                        .long("no-legacy-admin-bypass")
                        .help("Reject the hardcoded admin/admin1 pair unless it is stored")
                        .env("NOMA_NO_LEGACY_ADMIN_BYPASS")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new(CMD_USERS).about("List stored users (passwords omitted)"))
}
