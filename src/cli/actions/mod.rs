pub mod login;
pub mod logout;
pub mod probe;
pub mod register;
pub mod users;

// Internal "interpreter" for `Action`.
mod run;

use crate::{
    cli::globals::GlobalArgs,
    directory::StorageDirectory,
    storage::FileStorage,
};

#[derive(Debug)]
pub enum Action {
    Register(register::Args),
    Login(login::Args),
    AdminLogin(login::AdminArgs),
    Logout(logout::Args),
    Probe(probe::Args),
    Users(users::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }

    /// Store options, for actions that touch the stores.
    #[must_use]
    pub fn globals(&self) -> Option<&GlobalArgs> {
        match self {
            Self::Register(args) => Some(&args.globals),
            Self::Login(args) => Some(&args.globals),
            Self::AdminLogin(args) => Some(&args.globals),
            Self::Logout(args) => Some(&args.globals),
            Self::Users(args) => Some(&args.globals),
            Self::Probe(_) => None,
        }
    }
}

/// The user directory in the local store, migrated and seeded like on page load.
pub(crate) fn open_directory(globals: &GlobalArgs) -> StorageDirectory<FileStorage> {
    let directory = StorageDirectory::new(FileStorage::new(&globals.store));
    directory.prepare();
    directory
}
