//! Draggable floating alert button.
//!
//! The saved position is only applied when it came from a user drag
//! (`manual: true`); otherwise the default corner placement is used. Dragging
//! clamps to the viewport with an 8px margin, and releasing snaps to the
//! nearest side edge and persists the result.

use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::warn;

pub const POSITION_KEY: &str = "floatingAlertPos_v1";

/// Margin kept between the button and each viewport edge.
pub const EDGE_MARGIN: f64 = 8.0;

/// Pointer travel (px) after which a press counts as a drag.
pub const MOVE_THRESHOLD: f64 = 6.0;

/// Clicks this soon after a drag are swallowed.
pub const CLICK_SUPPRESS_WINDOW: Duration = Duration::from_millis(300);

pub const DEFAULT_RIGHT: f64 = 24.0;
pub const DEFAULT_BOTTOM: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatingPosition {
    pub left: f64,
    pub top: f64,
    #[serde(default)]
    pub manual: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Anchored to the bottom-right corner by offsets.
    Default { right: f64, bottom: f64 },
    /// Explicit top-left coordinates.
    Manual { left: f64, top: f64 },
}

/// Clamp one axis into `[EDGE_MARGIN, viewport - button - EDGE_MARGIN]`.
///
/// When the viewport is too small for the button, the upper bound wins.
#[must_use]
pub fn clamp_axis(value: f64, viewport: f64, button: f64) -> f64 {
    value.max(EDGE_MARGIN).min(viewport - button - EDGE_MARGIN)
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: f64,
    start_y: f64,
    origin_left: f64,
    origin_top: f64,
    moved: bool,
}

#[derive(Debug)]
pub struct FloatingButton<S> {
    storage: S,
    viewport: Size,
    button: Size,
    placement: Placement,
    drag: Option<Drag>,
    drag_ended_at: Option<Instant>,
}

impl<S: Storage> FloatingButton<S> {
    /// Attach to a page, applying the saved position only if it was manual.
    pub fn attach(storage: S, viewport: Size, button: Size) -> Self {
        let placement = match load_position(&storage) {
            Some(pos) if pos.manual => Placement::Manual {
                left: pos.left,
                top: pos.top,
            },
            _ => Placement::Default {
                right: DEFAULT_RIGHT,
                bottom: DEFAULT_BOTTOM,
            },
        };

        Self {
            storage,
            viewport,
            button,
            placement,
            drag: None,
            drag_ended_at: None,
        }
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Current top-left corner in viewport coordinates.
    #[must_use]
    pub fn top_left(&self) -> (f64, f64) {
        match self.placement {
            Placement::Manual { left, top } => (left, top),
            Placement::Default { right, bottom } => (
                self.viewport.width - self.button.width - right,
                self.viewport.height - self.button.height - bottom,
            ),
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let (origin_left, origin_top) = self.top_left();
        self.drag = Some(Drag {
            start_x: x,
            start_y: y,
            origin_left,
            origin_top,
            moved: false,
        });
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let dx = x - drag.start_x;
        let dy = y - drag.start_y;
        if !drag.moved && dx.hypot(dy) > MOVE_THRESHOLD {
            drag.moved = true;
        }

        self.placement = Placement::Manual {
            left: clamp_axis(drag.origin_left + dx, self.viewport.width, self.button.width),
            top: clamp_axis(drag.origin_top + dy, self.viewport.height, self.button.height),
        };
    }

    /// Finish a drag: snap to the nearest side, clamp, persist.
    pub fn pointer_up(&mut self, now: Instant) -> Option<FloatingPosition> {
        let drag = self.drag.take()?;

        let (left, top) = self.top_left();
        let center_x = left + self.button.width / 2.0;
        let snapped_left = if center_x < self.viewport.width / 2.0 {
            EDGE_MARGIN
        } else {
            self.viewport.width - self.button.width - EDGE_MARGIN
        };
        let clamped_top = clamp_axis(top, self.viewport.height, self.button.height);

        self.placement = Placement::Manual {
            left: snapped_left,
            top: clamped_top,
        };
        if drag.moved {
            self.drag_ended_at = Some(now);
        }

        let pos = FloatingPosition {
            left: snapped_left.round(),
            top: clamped_top.round(),
            manual: true,
        };
        self.persist(&pos);

        Some(pos)
    }

    pub fn pointer_cancel(&mut self) {
        self.drag = None;
    }

    /// A click on the button. Returns true when it should activate (the
    /// `floatingAlert:activate` event), false when swallowed after a drag.
    pub fn click(&mut self, now: Instant) -> bool {
        match self.drag_ended_at {
            Some(ended) if now.duration_since(ended) < CLICK_SUPPRESS_WINDOW => false,
            _ => {
                self.drag_ended_at = None;
                true
            }
        }
    }

    /// Clamp the stored position into the new viewport and persist it.
    pub fn resize(&mut self, viewport: Size) -> Option<FloatingPosition> {
        self.viewport = viewport;

        let stored = load_position(&self.storage)?;
        let left = clamp_axis(stored.left, viewport.width, self.button.width);
        let top = clamp_axis(stored.top, viewport.height, self.button.height);

        if stored.manual {
            self.placement = Placement::Manual { left, top };
        }

        let pos = FloatingPosition {
            left: left.round(),
            top: top.round(),
            manual: stored.manual,
        };
        self.persist(&pos);

        Some(pos)
    }

    fn persist(&self, pos: &FloatingPosition) {
        let raw = match serde_json::to_string(pos) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Error saving floating pos: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(POSITION_KEY, &raw) {
            warn!("Error saving floating pos: {e}");
        }
    }
}

/// Saved position, if present and well formed.
pub fn load_position<S: Storage>(storage: &S) -> Option<FloatingPosition> {
    let raw = match storage.get_item(POSITION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Error reading floating pos: {e}");
            return None;
        }
    };

    serde_json::from_str(&raw)
        .map_err(|e| warn!("Error reading floating pos: {e}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const VIEWPORT: Size = Size {
        width: 1024.0,
        height: 768.0,
    };
    const BUTTON: Size = Size {
        width: 56.0,
        height: 56.0,
    };

    fn stored(storage: &MemoryStorage) -> Option<FloatingPosition> {
        load_position(storage)
    }

    #[test]
    fn non_manual_saved_position_is_ignored() {
        let storage = MemoryStorage::with_items([(
            POSITION_KEY,
            r#"{"left":10,"top":10,"manual":false}"#,
        )]);
        let button = FloatingButton::attach(&storage, VIEWPORT, BUTTON);
        assert_eq!(
            button.placement(),
            Placement::Default {
                right: DEFAULT_RIGHT,
                bottom: DEFAULT_BOTTOM
            }
        );
    }

    #[test]
    fn manual_saved_position_is_applied() {
        let storage = MemoryStorage::with_items([(
            POSITION_KEY,
            r#"{"left":40,"top":300,"manual":true}"#,
        )]);
        let button = FloatingButton::attach(&storage, VIEWPORT, BUTTON);
        assert_eq!(button.placement(), Placement::Manual { left: 40.0, top: 300.0 });
    }

    #[test]
    fn malformed_saved_position_falls_back_to_default() {
        let storage = MemoryStorage::with_items([(POSITION_KEY, "{oops")]);
        let button = FloatingButton::attach(&storage, VIEWPORT, BUTTON);
        assert!(matches!(button.placement(), Placement::Default { .. }));
    }

    #[test]
    fn drag_snaps_to_left_edge_and_persists() {
        let storage = MemoryStorage::new();
        let mut button = FloatingButton::attach(&storage, VIEWPORT, BUTTON);
        let now = Instant::now();

        // Default top-left is (944, 612); drag it far left and up.
        button.pointer_down(970.0, 640.0);
        button.pointer_move(200.0, 300.0);
        assert!(button.is_dragging());

        let pos = button.pointer_up(now);
        let expected = FloatingPosition {
            left: 8.0,
            top: 272.0,
            manual: true,
        };
        assert_eq!(pos, Some(expected));
        assert_eq!(stored(&storage), Some(expected));
        assert!(!button.is_dragging());
    }

    #[test]
    fn drag_past_edges_is_clamped() {
        let storage = MemoryStorage::new();
        let mut button = FloatingButton::attach(&storage, VIEWPORT, BUTTON);

        button.pointer_down(970.0, 640.0);
        button.pointer_move(5000.0, 5000.0);
        assert_eq!(
            button.placement(),
            Placement::Manual {
                left: 1024.0 - 56.0 - 8.0,
                top: 768.0 - 56.0 - 8.0
            }
        );

        let pos = button.pointer_up(Instant::now());
        assert_eq!(pos.map(|p| p.left), Some(960.0));
    }

    #[test]
    fn click_right_after_drag_is_swallowed() {
        let storage = MemoryStorage::new();
        let mut button = FloatingButton::attach(&storage, VIEWPORT, BUTTON);
        let now = Instant::now();

        button.pointer_down(970.0, 640.0);
        button.pointer_move(900.0, 600.0);
        button.pointer_up(now);

        assert!(!button.click(now + Duration::from_millis(100)));
        assert!(button.click(now + Duration::from_millis(400)));
    }

    #[test]
    fn small_press_is_a_click_not_a_drag() {
        let storage = MemoryStorage::new();
        let mut button = FloatingButton::attach(&storage, VIEWPORT, BUTTON);
        let now = Instant::now();

        button.pointer_down(970.0, 640.0);
        button.pointer_move(972.0, 641.0);
        button.pointer_up(now);

        assert!(button.click(now));
    }

    #[test]
    fn cancel_ends_drag_without_persisting() {
        let storage = MemoryStorage::new();
        let mut button = FloatingButton::attach(&storage, VIEWPORT, BUTTON);

        button.pointer_down(970.0, 640.0);
        button.pointer_cancel();

        assert!(!button.is_dragging());
        assert_eq!(button.pointer_up(Instant::now()), None);
        assert_eq!(stored(&storage), None);
    }

    #[test]
    fn resize_clamps_stored_position_into_viewport() {
        let storage = MemoryStorage::with_items([(
            POSITION_KEY,
            r#"{"left":1500,"top":-40,"manual":true}"#,
        )]);
        let mut button = FloatingButton::attach(&storage, VIEWPORT, BUTTON);

        let small = Size::new(400.0, 300.0);
        let pos = button.resize(small);

        let expected = FloatingPosition {
            left: 400.0 - 56.0 - 8.0,
            top: 8.0,
            manual: true,
        };
        assert_eq!(pos, Some(expected));
        assert_eq!(stored(&storage), Some(expected));
        assert_eq!(button.placement(), Placement::Manual { left: 336.0, top: 8.0 });

        let pos = stored(&storage).unwrap_or(expected);
        assert!(pos.left >= EDGE_MARGIN && pos.left <= small.width - BUTTON.width - EDGE_MARGIN);
        assert!(pos.top >= EDGE_MARGIN && pos.top <= small.height - BUTTON.height - EDGE_MARGIN);
    }

    #[test]
    fn resize_without_saved_position_does_nothing() {
        let storage = MemoryStorage::new();
        let mut button = FloatingButton::attach(&storage, VIEWPORT, BUTTON);
        assert_eq!(button.resize(Size::new(400.0, 300.0)), None);
        assert_eq!(stored(&storage), None);
    }

    #[test]
    fn clamp_axis_prefers_upper_bound_when_viewport_is_tiny() {
        assert!((clamp_axis(0.0, 50.0, 56.0) - (-14.0)).abs() < f64::EPSILON);
    }
}
