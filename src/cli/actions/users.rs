use crate::{
    cli::{actions::open_directory, globals::GlobalArgs},
    directory::{Directory, User},
};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

/// One line per user; the password never leaves the store.
#[must_use]
pub fn format_user(user: &User) -> String {
    format!("{:<6}  {:<24}  {}", user.role.to_string(), user.email, user.name)
}

/// Execute the users action.
/// # Errors
/// Never fails today; unreadable stores list as empty.
pub fn execute(args: &Args) -> Result<()> {
    let directory = Directory::new(open_directory(&args.globals));
    for user in directory.users() {
        println!("{}", format_user(&user));
    }
    Ok(())
}
