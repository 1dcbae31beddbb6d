//! Output seams of the auth flows: user notices and page navigation.

use std::time::Duration;

/// How long a notice stays on screen.
pub const NOTICE_TIMEOUT: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub timeout: Duration,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timeout: NOTICE_TIMEOUT,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Shows notices to the user (the page snackbar).
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Moves the user to another page.
pub trait Navigator {
    fn navigate(&self, destination: &str);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn navigate(&self, destination: &str) {
        (**self).navigate(destination);
    }
}
