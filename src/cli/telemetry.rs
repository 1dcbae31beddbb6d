use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

fn env_filter(verbosity_level: Level) -> Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("hyper_util=error".parse()?)
        .add_directive("tokio=error".parse()?))
}

/// Initialize logging. Output goes to stderr so command output stays clean;
/// `RUST_LOG` overrides the verbosity level.
///
/// # Errors
///
/// Returns an error if the filter cannot be built or a global subscriber is
/// already set
pub fn init(verbosity_level: Option<Level>) -> Result<()> {
    let verbosity_level = verbosity_level.unwrap_or(Level::ERROR);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(false)
        .compact();

    let subscriber = Registry::default()
        .with(fmt_layer)
        .with(env_filter(verbosity_level)?);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
