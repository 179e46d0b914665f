//! Displayed-cursor state.
//!
//! The engine tracks which cursor kind is currently shown and swaps the
//! displayed visual only on changes. The actual image swap happens in the
//! excluded rendering layer behind the [`CursorSink`] seam.

use std::rc::Rc;

use scrim_foundation::CursorKind;

use crate::theme::{CursorVisual, Theme};

/// Seam to the platform/render layer that actually displays a cursor.
pub trait CursorSink {
    fn show_cursor(&self, kind: CursorKind, visual: &CursorVisual);
}

pub struct CursorState {
    current: CursorKind,
    sink: Option<Rc<dyn CursorSink>>,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            current: CursorKind::Pointer,
            sink: None,
        }
    }

    pub fn set_sink(&mut self, sink: Option<Rc<dyn CursorSink>>) {
        self.sink = sink;
    }

    /// Kind currently displayed.
    pub fn current(&self) -> CursorKind {
        self.current
    }

    /// Applies the cursor kind resolved for the surface under the mouse.
    /// `None` (nothing hit, or nothing declared a cursor) resets to the
    /// pointer. Only changes reach the sink.
    pub fn apply(&mut self, kind: Option<CursorKind>, theme: &Theme) {
        let kind = kind.unwrap_or_default();
        if kind == self.current {
            return;
        }
        log::trace!("cursor {:?} -> {:?}", self.current, kind);
        self.current = kind;
        if let Some(sink) = &self.sink {
            sink.show_cursor(kind, theme.cursor_visual(kind));
        }
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingSink {
        shown: RefCell<Vec<CursorKind>>,
    }

    impl CursorSink for RecordingSink {
        fn show_cursor(&self, kind: CursorKind, _visual: &CursorVisual) {
            self.shown.borrow_mut().push(kind);
        }
    }

    #[test]
    fn only_changes_reach_the_sink() {
        let theme = Theme::minimal();
        let sink = Rc::new(RecordingSink {
            shown: RefCell::new(Vec::new()),
        });
        let mut state = CursorState::new();
        state.set_sink(Some(sink.clone()));

        state.apply(Some(CursorKind::Pointer), &theme); // already shown
        state.apply(Some(CursorKind::Text), &theme);
        state.apply(Some(CursorKind::Text), &theme); // no change
        state.apply(None, &theme); // reset to pointer

        assert_eq!(
            *sink.shown.borrow(),
            vec![CursorKind::Text, CursorKind::Pointer]
        );
    }
}
