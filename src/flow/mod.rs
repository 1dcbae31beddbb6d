//! Register, login and admin-login form flows.
//!
//! Flow Overview:
//! 1) Validate synchronously. Bad input shows an error notice and changes
//!    nothing (state stays `Idle`, control stays enabled).
//! 2) `Idle -> Submitting`: disable the control, wait the simulated latency.
//! 3) Run the directory operation. Success shows a notice and either resets the
//!    register fields or, after a second delay, navigates by role. Rejection
//!    shows an error notice and re-enables the control.
//! 4) Back to `Idle`. There is no retry; the user submits again.

pub mod control;
pub mod notice;

pub use self::control::{FlowState, FormController, FormKind, SubmitControl, BUSY_LABEL};
pub use self::notice::{Navigator, Notice, NoticeKind, Notifier, NOTICE_TIMEOUT};

use crate::{
    directory::{normalize_email, valid_email_or_username, Directory, Role, User, UserRepository},
    error::Error,
};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument};

const MSG_REGISTER_MISSING: &str = "Completa todos los campos.";
const MSG_REGISTER_INVALID: &str = "Ingresa un email o nombre de usuario válido.";
const MSG_REGISTERED: &str = "Registro exitoso. Ya puedes iniciar sesión.";
const MSG_LOGIN_MISSING: &str = "Completa ambos campos.";
const MSG_LOGIN_INVALID: &str = "Email o usuario inválido.";
const MSG_ADMIN_MISSING: &str = "Completa ambos campos (admin).";
const MSG_ADMIN_WELCOME: &str = "Bienvenido, Admin!";
const MSG_STORAGE_FAILED: &str = "No se pudo guardar el registro. Intenta de nuevo.";

/// Where each role lands after signing in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    /// Admins signing in from the public login page.
    pub admin: String,
    /// Clients signing in from the public login page.
    pub client: String,
    /// Admins signing in from the admin login page (same folder as the dashboard).
    pub admin_login: String,
}

impl Default for Destinations {
    fn default() -> Self {
        Self {
            admin: "../admin/DashboardsAdmin.html".to_string(),
            client: "homePublic.html".to_string(),
            admin_login: "DashboardsAdmin.html".to_string(),
        }
    }
}

impl Destinations {
    #[must_use]
    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin,
            Role::Client => &self.client,
        }
    }
}

/// Simulated latencies and redirect targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    pub register_delay: Duration,
    pub login_delay: Duration,
    pub admin_delay: Duration,
    pub login_redirect_delay: Duration,
    pub admin_redirect_delay: Duration,
    pub destinations: Destinations,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            register_delay: Duration::from_millis(900),
            login_delay: Duration::from_millis(900),
            admin_delay: Duration::from_millis(800),
            login_redirect_delay: Duration::from_millis(700),
            admin_redirect_delay: Duration::from_millis(600),
            destinations: Destinations::default(),
        }
    }
}

impl FlowConfig {
    /// Same destinations, no artificial waiting.
    #[must_use]
    pub fn instant(self) -> Self {
        Self {
            register_delay: Duration::ZERO,
            login_delay: Duration::ZERO,
            admin_delay: Duration::ZERO,
            login_redirect_delay: Duration::ZERO,
            admin_redirect_delay: Duration::ZERO,
            ..self
        }
    }
}

#[derive(Debug, Default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl RegisterInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: SecretString) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password,
        }
    }

    /// Clear every field, as the page does after a successful registration.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub struct LoginInput {
    pub email: String,
    pub password: SecretString,
}

impl LoginInput {
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

#[derive(Debug, Default)]
pub struct AdminLoginInput {
    pub user: String,
    pub password: SecretString,
}

impl AdminLoginInput {
    pub fn new(user: impl Into<String>, password: SecretString) -> Self {
        Self {
            user: user.into(),
            password,
        }
    }
}

/// Result of one submission.
#[derive(Debug)]
pub enum Outcome {
    /// Rejected by synchronous validation; the form never left `Idle`.
    Invalid(Error),
    /// Submitted and rejected by the directory.
    Rejected(Error),
    Registered(User),
    SignedIn { user: User, destination: String },
}

impl Outcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Registered(_) | Self::SignedIn { .. })
    }
}

/// Drives the three forms against one directory.
pub struct AuthFlow<R, N, V> {
    directory: Directory<R>,
    notifier: N,
    navigator: V,
    config: FlowConfig,
}

impl<R, N, V> AuthFlow<R, N, V>
where
    R: UserRepository,
    N: Notifier,
    V: Navigator,
{
    pub fn new(directory: Directory<R>, notifier: N, navigator: V, config: FlowConfig) -> Self {
        Self {
            directory,
            notifier,
            navigator,
            config,
        }
    }

    pub fn directory(&self) -> &Directory<R> {
        &self.directory
    }

    #[must_use]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    fn invalid(&self, message: &str) -> Outcome {
        self.notifier.notify(Notice::error(message));
        Outcome::Invalid(Error::Validation(message.to_string()))
    }

    fn reject(&self, form: &mut FormController, err: Error) -> Outcome {
        let message = if err.is_recoverable() {
            err.to_string()
        } else {
            error!("{:?} form failed: {err}", form.kind());
            MSG_STORAGE_FAILED.to_string()
        };
        form.release();
        form.finish(FlowState::Rejected);
        self.notifier.notify(Notice::error(message));
        form.settle();
        Outcome::Rejected(err)
    }

    /// Submit the register form. Successful registration clears `input`.
    #[instrument(skip_all, fields(email = %input.email.trim()))]
    pub async fn submit_register(&self, form: &mut FormController, input: &mut RegisterInput) -> Outcome {
        let email = normalize_email(&input.email);
        if input.name.trim().is_empty() || email.is_empty() || input.password.expose_secret().is_empty() {
            return self.invalid(MSG_REGISTER_MISSING);
        }
        if !valid_email_or_username(&email) {
            return self.invalid(MSG_REGISTER_INVALID);
        }

        form.begin();
        sleep(self.config.register_delay).await;

        match self.directory.register(&input.name, &email, &input.password) {
            Ok(user) => {
                form.release();
                form.finish(FlowState::Success);
                input.reset();
                self.notifier.notify(Notice::success(MSG_REGISTERED));
                form.settle();
                Outcome::Registered(user)
            }
            Err(e) => self.reject(form, e),
        }
    }

    /// Submit the public login form and redirect by role.
    #[instrument(skip_all, fields(email = %input.email.trim()))]
    pub async fn submit_login(&self, form: &mut FormController, input: &LoginInput) -> Outcome {
        let email = normalize_email(&input.email);
        if email.is_empty() || input.password.expose_secret().is_empty() {
            return self.invalid(MSG_LOGIN_MISSING);
        }
        if !valid_email_or_username(&email) {
            return self.invalid(MSG_LOGIN_INVALID);
        }

        form.begin();
        sleep(self.config.login_delay).await;

        let user = match self.directory.authenticate(&email, &input.password) {
            Ok(user) => user,
            Err(e) => return self.reject(form, e),
        };

        form.release();
        form.finish(FlowState::Success);
        let name = if user.name.is_empty() { "usuario" } else { user.name.as_str() };
        self.notifier.notify(Notice::success(format!("Bienvenido, {name}!")));

        sleep(self.config.login_redirect_delay).await;
        let destination = self.config.destinations.for_role(user.role).to_string();
        info!("signed in {} as {}, redirecting to {destination}", user.email, user.role);
        self.navigator.navigate(&destination);
        form.settle();

        Outcome::SignedIn { user, destination }
    }

    /// Submit the admin login form.
    #[instrument(skip_all, fields(user = %input.user.trim()))]
    pub async fn submit_admin_login(&self, form: &mut FormController, input: &AdminLoginInput) -> Outcome {
        let user = normalize_email(&input.user);
        if user.is_empty() || input.password.expose_secret().is_empty() {
            return self.invalid(MSG_ADMIN_MISSING);
        }

        form.begin();
        sleep(self.config.admin_delay).await;

        let admin = match self.directory.authenticate_admin(&user, &input.password) {
            Ok(admin) => admin,
            Err(e) => return self.reject(form, e),
        };

        form.release();
        form.finish(FlowState::Success);
        self.notifier.notify(Notice::success(MSG_ADMIN_WELCOME));

        sleep(self.config.admin_redirect_delay).await;
        let destination = self.config.destinations.admin_login.clone();
        info!("admin {} signed in, redirecting to {destination}", admin.email);
        self.navigator.navigate(&destination);
        form.settle();

        Outcome::SignedIn {
            user: admin,
            destination,
        }
    }
}
