//! Per-form state machine and submit button state.

use tracing::debug;

/// Label shown on the submit control while a submission is in flight.
pub const BUSY_LABEL: &str = "Procesando...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Register,
    Login,
    AdminLogin,
}

impl FormKind {
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Register => "Registrarse",
            Self::Login | Self::AdminLogin => "Ingresar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Submitting,
    Success,
    Rejected,
}

/// The submit button: disabled flag and label swap while busy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    label: String,
    original_label: Option<String>,
    disabled: bool,
    loading: bool,
}

impl SubmitControl {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            original_label: None,
            disabled: false,
            loading: false,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        if loading {
            self.disabled = true;
            if self.original_label.is_none() {
                self.original_label = Some(std::mem::replace(&mut self.label, BUSY_LABEL.to_string()));
            }
            self.loading = true;
        } else {
            self.disabled = false;
            if let Some(original) = self.original_label.take() {
                self.label = original;
            }
            self.loading = false;
        }
    }
}

/// One form's controller. Forms are independent: each owns its state.
#[derive(Debug, Clone)]
pub struct FormController {
    kind: FormKind,
    state: FlowState,
    control: SubmitControl,
    visited: Vec<FlowState>,
}

impl FormController {
    #[must_use]
    pub fn new(kind: FormKind) -> Self {
        Self::with_label(kind, kind.default_label())
    }

    pub fn with_label(kind: FormKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            state: FlowState::Idle,
            control: SubmitControl::new(label),
            visited: vec![FlowState::Idle],
        }
    }

    #[must_use]
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> FlowState {
        self.state
    }

    #[must_use]
    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    /// States entered since creation, oldest first.
    #[must_use]
    pub fn visited(&self) -> &[FlowState] {
        &self.visited
    }

    /// `Idle -> Submitting`: disable the control and show the busy label.
    pub(crate) fn begin(&mut self) {
        self.control.set_loading(true);
        self.enter(FlowState::Submitting);
    }

    /// Re-enable the control and restore its label.
    pub(crate) fn release(&mut self) {
        self.control.set_loading(false);
    }

    /// `Submitting -> Success | Rejected`.
    pub(crate) fn finish(&mut self, state: FlowState) {
        self.enter(state);
    }

    /// Back to `Idle`, ready for a new submission.
    pub(crate) fn settle(&mut self) {
        self.control.set_loading(false);
        self.enter(FlowState::Idle);
    }

    fn enter(&mut self, state: FlowState) {
        debug!("{:?} form: {:?} -> {:?}", self.kind, self.state, state);
        self.state = state;
        self.visited.push(state);
    }
}
