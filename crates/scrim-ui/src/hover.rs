//! Hover ownership.
//!
//! Exactly one leaf surface (or none) is hovered per HUD instance: the
//! deepest surface under the mouse within the topmost pick chain. The
//! tracker guarantees the exactly-once invariant: whenever the topmost leaf
//! changes (or disappears), the old leaf receives one exit notification
//! before any new enter is issued.

use scrim_foundation::{Surface, SurfaceHandle, SurfaceId};

pub struct HoverTracker {
    current: Option<SurfaceHandle>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn current(&self) -> Option<&SurfaceHandle> {
        self.current.as_ref()
    }

    /// Pre-dispatch divergence check. If a surface is hovered and the new
    /// topmost leaf differs (or there is none), fires exit on the old one
    /// and clears hover state. The exit is skipped when the old surface has
    /// since been detached. Returns the surface that was notified so the
    /// caller can forward the exit to global listeners.
    pub fn diverge(
        &mut self,
        new_leaf: Option<&SurfaceHandle>,
        focused: Option<SurfaceId>,
    ) -> Option<SurfaceHandle> {
        let diverged = match (&self.current, new_leaf) {
            (Some(old), Some(new)) => new.id() != old.id(),
            (Some(_), None) => true,
            (None, _) => false,
        };
        if !diverged {
            return None;
        }
        let old = self.current.take()?;
        if !old.is_attached() {
            log::trace!("hovered surface #{} detached, skipping exit", old.id());
            return None;
        }
        old.on_mouse_exited(false, focused == Some(old.id()));
        Some(old)
    }

    /// Records the new hovered leaf. The caller fires the enter
    /// notification; this keeps enter/exit ordering in one place (the pick
    /// pipeline).
    pub fn set(&mut self, leaf: SurfaceHandle) {
        self.current = Some(leaf);
    }
}

impl Default for HoverTracker {
    fn default() -> Self {
        Self::new()
    }
}
