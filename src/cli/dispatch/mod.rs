use crate::{
    cli::{
        actions::{login, logout, probe, register, users, Action},
        commands::{
            accounts::{
                ARG_EMAIL, ARG_NAME, ARG_NO_LEGACY_ADMIN_BYPASS, ARG_PASSWORD, ARG_USER,
                CMD_ADMIN_LOGIN, CMD_LOGIN, CMD_REGISTER, CMD_USERS,
            },
            logout::{
                ARG_LOGIN_CANDIDATES, ARG_LOGOUT_ENDPOINT, ARG_PAGE_URL, ARG_PROBE_TIMEOUT,
                CMD_LOGOUT, CMD_PROBE,
            },
            storage::{
                ARG_INSTANT, ARG_SESSION_STORE, ARG_STORE, DEFAULT_SESSION_STORE, DEFAULT_STORE,
            },
        },
        globals::GlobalArgs,
    },
    prober::{normalize_candidates, DEFAULT_PROBE_TIMEOUT},
    session::normalize_endpoint,
};
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};
use url::Url;

fn globals(matches: &ArgMatches) -> GlobalArgs {
    let store = matches
        .get_one::<PathBuf>(ARG_STORE)
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE));
    let session_store = matches
        .get_one::<PathBuf>(ARG_SESSION_STORE)
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_STORE));

    GlobalArgs::new(store, session_store).with_instant(matches.get_flag(ARG_INSTANT))
}

fn text(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn password(matches: &ArgMatches) -> SecretString {
    SecretString::from(text(matches, ARG_PASSWORD))
}

fn page_url(matches: &ArgMatches) -> Result<Url> {
    let raw = matches
        .get_one::<String>(ARG_PAGE_URL)
        .context("missing required argument: --page-url")?;
    Url::parse(raw.trim()).with_context(|| format!("invalid page URL: {raw}"))
}

fn candidates(matches: &ArgMatches) -> Vec<String> {
    normalize_candidates(
        matches
            .get_many::<String>(ARG_LOGIN_CANDIDATES)
            .into_iter()
            .flatten(),
    )
}

fn probe_timeout(matches: &ArgMatches) -> Duration {
    matches
        .get_one::<u64>(ARG_PROBE_TIMEOUT)
        .copied()
        .map_or(DEFAULT_PROBE_TIMEOUT, Duration::from_millis)
}

/// # Errors
/// Returns an error if the subcommand is unknown or an argument is invalid.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = globals(matches);

    match matches.subcommand() {
        Some((CMD_REGISTER, sub)) => Ok(Action::Register(register::Args {
            globals,
            name: text(sub, ARG_NAME),
            email: text(sub, ARG_EMAIL),
            password: password(sub),
        })),
        Some((CMD_LOGIN, sub)) => Ok(Action::Login(login::Args {
            globals,
            email: text(sub, ARG_EMAIL),
            password: password(sub),
        })),
        Some((CMD_ADMIN_LOGIN, sub)) => Ok(Action::AdminLogin(login::AdminArgs {
            globals,
            user: text(sub, ARG_USER),
            password: password(sub),
            legacy_admin_bypass: !sub.get_flag(ARG_NO_LEGACY_ADMIN_BYPASS),
        })),
        Some((CMD_LOGOUT, sub)) => Ok(Action::Logout(logout::Args {
            globals,
            page: page_url(sub)?,
            endpoint: normalize_endpoint(sub.get_one::<String>(ARG_LOGOUT_ENDPOINT).map(String::as_str)),
            candidates: candidates(sub),
            probe_timeout: probe_timeout(sub),
        })),
        Some((CMD_PROBE, sub)) => Ok(Action::Probe(probe::Args {
            page: page_url(sub)?,
            candidates: candidates(sub),
            probe_timeout: probe_timeout(sub),
        })),
        Some((CMD_USERS, _)) => Ok(Action::Users(users::Args { globals })),
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("missing command"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cli::commands, prober::default_candidates};
    use secrecy::ExposeSecret;

    const NOMA_VARS: [&str; 13] = [
        "NOMA_LOG_LEVEL",
        "NOMA_STORE",
        "NOMA_SESSION_STORE",
        "NOMA_INSTANT",
        "NOMA_NAME",
        "NOMA_EMAIL",
        "NOMA_PASSWORD",
        "NOMA_ADMIN_USER",
        "NOMA_NO_LEGACY_ADMIN_BYPASS",
        "NOMA_PAGE_URL",
        "NOMA_LOGIN_CANDIDATES",
        "NOMA_PROBE_TIMEOUT_MS",
        "NOMA_LOGOUT_ENDPOINT",
    ];

    fn dispatch(args: &[&str]) -> Result<Action> {
        temp_env::with_vars(NOMA_VARS.map(|k| (k, None::<&str>)), || {
            let matches = commands::new().try_get_matches_from(args)?;
            handler(&matches)
        })
    }

    #[test]
    fn test_register() {
        let action = dispatch(&[
            "noma", "--store", "/tmp/u.json", "register", "--name", "Ana", "--email",
            "ana@x.com", "--password", "p1",
        ]);
        let Ok(Action::Register(args)) = action else {
            panic!("expected register action");
        };
        assert_eq!(args.globals.store, PathBuf::from("/tmp/u.json"));
        assert_eq!(args.name, "Ana");
        assert_eq!(args.email, "ana@x.com");
        assert_eq!(args.password.expose_secret(), "p1");
    }

    #[test]
    fn test_blank_fields_reach_the_form() {
        let Ok(Action::Login(args)) = dispatch(&["noma", "login"]) else {
            panic!("expected login action");
        };
        assert_eq!(args.email, "");
        assert_eq!(args.password.expose_secret(), "");
    }

    #[test]
    fn test_admin_login_bypass_flag() {
        let Ok(Action::AdminLogin(args)) =
            dispatch(&["noma", "admin-login", "-u", "admin", "-p", "admin1"])
        else {
            panic!("expected admin-login action");
        };
        assert!(args.legacy_admin_bypass);

        let Ok(Action::AdminLogin(args)) = dispatch(&[
            "noma",
            "--instant",
            "admin-login",
            "--user",
            "admin",
            "--no-legacy-admin-bypass",
        ]) else {
            panic!("expected admin-login action");
        };
        assert!(!args.legacy_admin_bypass);
        assert!(args.globals.instant);
    }

    #[test]
    fn test_logout_normalizes_inputs() {
        let Ok(Action::Logout(args)) = dispatch(&[
            "noma",
            "logout",
            "--page-url",
            "https://site.test/admin/DashboardsAdmin.html",
            "--logout-endpoint",
            "   ",
            "--login-candidates",
            " /a , ,/b",
            "--probe-timeout-ms",
            "300",
        ]) else {
            panic!("expected logout action");
        };
        assert_eq!(args.page.path(), "/admin/DashboardsAdmin.html");
        assert_eq!(args.endpoint, None);
        assert_eq!(args.candidates, vec!["/a".to_string(), "/b".to_string()]);
        assert_eq!(args.probe_timeout, Duration::from_millis(300));
    }

    #[test]
    fn test_probe_defaults() {
        let Ok(Action::Probe(args)) =
            dispatch(&["noma", "probe", "--page-url", "https://site.test/admin/x.html"])
        else {
            panic!("expected probe action");
        };
        assert_eq!(args.candidates, default_candidates());
        assert_eq!(args.probe_timeout, DEFAULT_PROBE_TIMEOUT);
    }

    #[test]
    fn test_invalid_page_url() {
        let result = dispatch(&["noma", "probe", "--page-url", "not a url"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_users() {
        assert!(matches!(dispatch(&["noma", "users"]), Ok(Action::Users(_))));
    }
}
