use crate::cli::actions::{login, logout, probe, register, users, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Register(args) => register::execute(args).await,
        Action::Login(args) => login::execute(args).await,
        Action::AdminLogin(args) => login::execute_admin(args).await,
        Action::Logout(args) => logout::execute(args).await,
        Action::Probe(args) => probe::execute(args).await,
        Action::Users(args) => users::execute(&args),
    }
}
