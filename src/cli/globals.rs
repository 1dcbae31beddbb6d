use crate::flow::FlowConfig;
use std::path::PathBuf;

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    /// File standing in for `localStorage`.
    pub store: PathBuf,
    /// File standing in for `sessionStorage`.
    pub session_store: PathBuf,
    pub instant: bool,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(store: impl Into<PathBuf>, session_store: impl Into<PathBuf>) -> Self {
        Self {
            store: store.into(),
            session_store: session_store.into(),
            instant: false,
        }
    }

    #[must_use]
    pub fn with_instant(mut self, instant: bool) -> Self {
        self.instant = instant;
        self
    }

    /// Flow timings; `--instant` drops the simulated latency.
    #[must_use]
    pub fn flow_config(&self) -> FlowConfig {
        if self.instant {
            FlowConfig::default().instant()
        } else {
            FlowConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new("local.json", "session.json");
        assert_eq!(args.store, PathBuf::from("local.json"));
        assert_eq!(args.session_store, PathBuf::from("session.json"));
        assert!(!args.instant);
        assert!(args.flow_config().login_delay > Duration::ZERO);
    }

    #[test]
    fn test_instant_flow_config() {
        let config = GlobalArgs::new("a", "b").with_instant(true).flow_config();
        assert_eq!(config.register_delay, Duration::ZERO);
        assert_eq!(config.admin_redirect_delay, Duration::ZERO);
    }
}
