//! Page widgets as plain state machines.
//!
//! Each widget is built from already-resolved inputs. Where a page would have
//! silently skipped a missing element, constructors fail with
//! [`WidgetError::ElementNotFound`] instead.

pub mod floating;
pub mod nav;
pub mod scroll;
pub mod tutorial;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("element not found: {0}")]
    ElementNotFound(&'static str),
}

/// Enter and Space activate buttons and cards like a click.
#[must_use]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}
