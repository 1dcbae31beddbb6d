//! Tutorial carousel and the account settings modal.

use super::WidgetError;
use crate::flow::Notice;

pub const NEXT_LABEL: &str = "Siguiente ›";
pub const FINISH_LABEL: &str = "Finalizar";

const MSG_ACCOUNT_REQUIRED: &str = "Por favor completa los campos requeridos (nombre y correo).";
const MSG_ACCOUNT_SAVED: &str = "Cambios guardados";

/// Progress shown for slide `index` of `total`, rounded to whole percent.
///
/// A carousel with zero or one slide is always complete.
#[must_use]
pub fn progress_percent(index: usize, total: usize) -> u8 {
    if total <= 1 {
        return 100;
    }
    let last = total - 1;
    let index = index.min(last);
    // round(index / last * 100), halves rounded up
    u8::try_from((index * 200 + last) / (last * 2)).unwrap_or(100)
}

/// Modal with a fixed set of slides and a progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tutorial {
    total: usize,
    index: usize,
    open: bool,
}

impl Tutorial {
    /// # Errors
    /// `WidgetError::ElementNotFound` when there are no slides.
    pub fn new(total: usize) -> Result<Self, WidgetError> {
        if total == 0 {
            return Err(WidgetError::ElementNotFound(".tutorial-slide"));
        }
        Ok(Self {
            total,
            index: 0,
            open: false,
        })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open on slide `start` (clamped).
    pub fn open(&mut self, start: usize) {
        self.open = true;
        self.go_to(start);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Jump to slide `index`, clamped to the last slide.
    pub fn go_to(&mut self, index: usize) {
        self.index = index.min(self.total - 1);
    }

    pub fn previous(&mut self) {
        self.go_to(self.index.saturating_sub(1));
    }

    /// Advance, or close the modal from the last slide.
    pub fn next(&mut self) {
        if self.is_last() {
            self.close();
        } else {
            self.go_to(self.index + 1);
        }
    }

    /// Keyboard handling while open: Escape closes, arrows move without
    /// ever closing. Returns whether the key was handled.
    pub fn key(&mut self, key: &str) -> bool {
        if !self.open {
            return false;
        }
        match key {
            "Escape" => self.close(),
            "ArrowLeft" => self.previous(),
            "ArrowRight" => self.go_to(self.index + 1),
            _ => return false,
        }
        true
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index == self.total - 1
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        progress_percent(self.index, self.total)
    }

    #[must_use]
    pub fn step_label(&self) -> String {
        format!("Paso {}", self.index + 1)
    }

    #[must_use]
    pub fn previous_disabled(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.is_last() {
            FINISH_LABEL
        } else {
            NEXT_LABEL
        }
    }
}

/// Account settings modal. Saving only checks the required fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AccountModal {
    open: bool,
}

impl AccountModal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn key(&mut self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    /// Name and email must be non-blank. On success the modal closes.
    ///
    /// # Errors
    /// An error notice when a required field is blank; the modal stays open.
    pub fn save(&mut self, full_name: &str, email: &str) -> Result<Notice, Notice> {
        if full_name.trim().is_empty() || email.trim().is_empty() {
            return Err(Notice::error(MSG_ACCOUNT_REQUIRED));
        }
        self.close();
        Ok(Notice::success(MSG_ACCOUNT_SAVED))
    }
}
