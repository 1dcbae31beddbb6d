use crate::{
    cli::{actions::open_directory, globals::GlobalArgs, terminal::Terminal},
    directory::Directory,
    flow::{AuthFlow, FormController, FormKind, Outcome, RegisterInput},
};
use anyhow::{Context, Result};
use secrecy::SecretString;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Execute the register action.
/// # Errors
/// Returns an error if the form is invalid or the directory rejects it.
pub async fn execute(args: Args) -> Result<()> {
    let directory = Directory::new(open_directory(&args.globals));
    let flow = AuthFlow::new(directory, Terminal, Terminal, args.globals.flow_config());

    let mut form = FormController::new(FormKind::Register);
    let mut input = RegisterInput::new(args.name, args.email, args.password);

    match flow.submit_register(&mut form, &mut input).await {
        Outcome::Invalid(e) | Outcome::Rejected(e) => Err(e).context("registration failed"),
        Outcome::Registered(_) | Outcome::SignedIn { .. } => Ok(()),
    }
}
