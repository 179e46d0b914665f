//! Theme: the style-resolution context a HUD is constructed with.
//!
//! A theme is an explicit value passed into [`crate::Hud::new`], never a
//! process-wide static, so two HUD instances can carry distinct themes and
//! tests stay deterministic. The dispatch engine only consumes cursor
//! visuals from it; widget skins are resolved by the excluded rendering
//! layer against the same object.

use rustc_hash::FxHashMap;

use scrim_foundation::CursorKind;
use scrim_ui_graphics::Point;

/// Identifies the image and hotspot used to display one cursor kind.
/// The image is a key into the excluded texture subsystem.
#[derive(Clone, Debug, PartialEq)]
pub struct CursorVisual {
    pub image: String,
    pub hotspot: Point,
}

impl CursorVisual {
    pub fn new(image: impl Into<String>, hotspot: Point) -> Self {
        Self {
            image: image.into(),
            hotspot,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Theme {
    name: String,
    cursors: FxHashMap<CursorKind, CursorVisual>,
    pointer: CursorVisual,
}

impl Theme {
    /// The built-in fallback theme: a bare pointer cursor and nothing else.
    /// Asset-loading failures in the excluded theme loader degrade to this
    /// rather than breaking picking and dispatch.
    pub fn minimal() -> Self {
        Self::new("minimal")
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cursors: FxHashMap::default(),
            pointer: CursorVisual::new("cursor/pointer", Point::ZERO),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_cursor(mut self, kind: CursorKind, visual: CursorVisual) -> Self {
        if kind == CursorKind::Pointer {
            self.pointer = visual;
        } else {
            self.cursors.insert(kind, visual);
        }
        self
    }

    /// Resolves the visual for a cursor kind, falling back to the pointer
    /// when the kind has no configured visual.
    pub fn cursor_visual(&self, kind: CursorKind) -> &CursorVisual {
        if kind == CursorKind::Pointer {
            return &self.pointer;
        }
        self.cursors.get(&kind).unwrap_or_else(|| {
            log::debug!("no cursor visual configured for {kind:?}, using pointer");
            &self.pointer
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::minimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_kind_falls_back_to_pointer() {
        let theme = Theme::minimal();
        assert_eq!(
            theme.cursor_visual(CursorKind::Text),
            theme.cursor_visual(CursorKind::Pointer)
        );
    }

    #[test]
    fn configured_kind_resolves() {
        let theme = Theme::new("test")
            .with_cursor(CursorKind::Text, CursorVisual::new("cursor/beam", Point::ZERO));
        assert_eq!(theme.cursor_visual(CursorKind::Text).image, "cursor/beam");
    }

    #[test]
    fn themes_are_independent_values() {
        let a = Theme::new("a").with_cursor(
            CursorKind::Hand,
            CursorVisual::new("cursor/hand-a", Point::ZERO),
        );
        let b = Theme::new("b");
        assert_eq!(a.cursor_visual(CursorKind::Hand).image, "cursor/hand-a");
        assert_eq!(b.cursor_visual(CursorKind::Hand).image, "cursor/pointer");
    }
}
