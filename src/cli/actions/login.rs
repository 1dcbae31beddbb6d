use crate::{
    cli::{actions::open_directory, globals::GlobalArgs, terminal::Terminal},
    directory::Directory,
    flow::{AdminLoginInput, AuthFlow, FormController, FormKind, LoginInput, Outcome},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct AdminArgs {
    pub globals: GlobalArgs,
    pub user: String,
    pub password: SecretString,
    pub legacy_admin_bypass: bool,
}

fn finish(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Invalid(e) | Outcome::Rejected(e) => Err(e).context("sign in failed"),
        Outcome::SignedIn { user, destination } => {
            debug!("{} ({}) lands on {destination}", user.email, user.role);
            Ok(())
        }
        Outcome::Registered(_) => Ok(()),
    }
}

/// Execute the public login action.
/// # Errors
/// Returns an error if the credentials are rejected.
pub async fn execute(args: Args) -> Result<()> {
    let directory = Directory::new(open_directory(&args.globals));
    let flow = AuthFlow::new(directory, Terminal, Terminal, args.globals.flow_config());

    let mut form = FormController::new(FormKind::Login);
    let input = LoginInput::new(args.email, args.password);

    finish(flow.submit_login(&mut form, &input).await)
}

/// Execute the admin login action.
/// # Errors
/// Returns an error if the credentials are rejected.
pub async fn execute_admin(args: AdminArgs) -> Result<()> {
    let mut directory = Directory::new(open_directory(&args.globals));
    if !args.legacy_admin_bypass {
        directory = directory.without_legacy_admin_bypass();
    }
    let flow = AuthFlow::new(directory, Terminal, Terminal, args.globals.flow_config());

    let mut form = FormController::new(FormKind::AdminLogin);
    let input = AdminLoginInput::new(args.user, args.password);

    finish(flow.submit_admin_login(&mut form, &input).await)
}
