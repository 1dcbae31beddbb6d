//! Terminal rendering of notices and redirects.

use crate::flow::{Navigator, Notice, NoticeKind, Notifier};

/// Prints notices instead of showing a snackbar; redirects become a line
/// naming the destination.
#[derive(Debug, Default, Clone, Copy)]
pub struct Terminal;

#[must_use]
pub fn render(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Info => "info",
        NoticeKind::Success => "ok",
        NoticeKind::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}

impl Notifier for Terminal {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            eprintln!("{}", render(&notice));
        } else {
            println!("{}", render(&notice));
        }
    }
}

impl Navigator for Terminal {
    fn navigate(&self, destination: &str) {
        println!("-> {destination}");
    }
}
