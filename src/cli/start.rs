use crate::cli::{actions::Action, commands, dispatch, globals::GlobalArgs, telemetry};
use anyhow::{bail, Result};
use tracing::debug;

/// Map verbosity count to tracing level
const fn get_verbosity_level(verbosity: u8) -> Option<tracing::Level> {
    match verbosity {
        0 => None,
        1 => Some(tracing::Level::WARN),
        2 => Some(tracing::Level::INFO),
        3 => Some(tracing::Level::DEBUG),
        _ => Some(tracing::Level::TRACE),
    }
}

/// Both stores must be usable as files; missing parents are created on write.
fn check_stores(globals: &GlobalArgs) -> Result<()> {
    for (name, path) in [("store", &globals.store), ("session store", &globals.session_store)] {
        if path.is_dir() {
            bail!("{name} path is a directory: {}", path.display());
        }
    }
    Ok(())
}

/// Main entry point for the CLI - builds and returns the Action
///
/// # Errors
///
/// Returns an error if argument parsing, telemetry initialization, or action dispatch fails
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity_level = get_verbosity_level(
        matches
            .get_one::<u8>(commands::logging::ARG_VERBOSITY)
            .copied()
            .unwrap_or(0),
    );

    telemetry::init(verbosity_level)?;

    let action = dispatch::handler(&matches)?;

    if let Some(globals) = action.globals() {
        check_stores(globals)?;
        debug!(
            store = %globals.store.display(),
            session_store = %globals.session_store.display(),
            instant = globals.instant,
            "Using stores"
        );
    }

    Ok(action)
}
