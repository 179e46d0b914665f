//! Volatile popups, the modal dialog stack, and context-menu visibility.
//!
//! All three interact with picking precedence: an open volatile popup is
//! tested exclusively; otherwise the top visible dialog shadows everything
//! below it. Context-menu resolution runs after every press/release pick.

use scrim_foundation::{
    MenuHandle, MouseButton, PickReason, PickResult, Surface, SurfaceHandle, SurfaceId,
};
use scrim_ui_graphics::Point;

use crate::hud::VOLATILE_POPUP_Z;

struct VolatilePopup {
    popup: SurfaceHandle,
    assembly: SurfaceHandle,
    shadow: Option<SurfaceHandle>,
}

pub struct PopupCoordinator {
    volatile: Option<VolatilePopup>,
    dialogs: Vec<SurfaceHandle>,
    default_menu: Option<MenuHandle>,
    displayed_menu: Option<MenuHandle>,
    void_menu_enabled: bool,
}

impl PopupCoordinator {
    pub fn new() -> Self {
        Self {
            volatile: None,
            dialogs: Vec::new(),
            default_menu: None,
            displayed_menu: None,
            void_menu_enabled: false,
        }
    }

    // ------------------------------------------------------------------
    // Volatile popup
    // ------------------------------------------------------------------

    /// Opens a volatile popup owned by `assembly` (the widget that spawned
    /// it). Replaces any popup already open; returns the replaced one.
    ///
    /// The popup must be heavyweight: it has to exist as an independent
    /// top-level overlay. Anything else is a caller contract breach.
    pub fn open_volatile(
        &mut self,
        popup: SurfaceHandle,
        assembly: SurfaceHandle,
        position: Point,
        shadow: Option<SurfaceHandle>,
    ) -> Option<SurfaceHandle> {
        assert!(
            popup.is_heavyweight(),
            "volatile popup surface #{} must be heavyweight",
            popup.id()
        );
        let replaced = self.close_volatile();
        if let Some(shadow) = &shadow {
            shadow.set_origin(position);
            shadow.set_z_index(VOLATILE_POPUP_Z - 1);
            shadow.set_attached(true);
        }
        popup.set_origin(position);
        popup.set_z_index(VOLATILE_POPUP_Z);
        popup.set_attached(true);
        log::debug!(
            "volatile popup #{} opened for assembly #{}",
            popup.id(),
            assembly.id()
        );
        self.volatile = Some(VolatilePopup {
            popup,
            assembly,
            shadow,
        });
        replaced
    }

    /// Closes the current volatile popup, returning it. Closing when none
    /// is open is a no-op.
    pub fn close_volatile(&mut self) -> Option<SurfaceHandle> {
        let volatile = self.volatile.take()?;
        volatile.popup.set_attached(false);
        if let Some(shadow) = &volatile.shadow {
            shadow.set_attached(false);
        }
        log::debug!("volatile popup #{} closed", volatile.popup.id());
        Some(volatile.popup)
    }

    pub fn volatile_popup(&self) -> Option<&SurfaceHandle> {
        self.volatile.as_ref().map(|v| &v.popup)
    }

    /// Press-time auto-dismiss: a press that lands on neither the popup nor
    /// its owning assembly closes the popup.
    ///
    /// The popup is hit-tested exclusively while open, so the assembly can
    /// never be the topmost result; it is checked geometrically instead. A
    /// press with no topmost result outside the assembly counts as outside.
    pub fn dismiss_volatile_if_outside(
        &mut self,
        top: Option<&PickResult>,
        point: Point,
    ) -> Option<SurfaceHandle> {
        let volatile = self.volatile.as_ref()?;
        let own = [volatile.popup.id(), volatile.assembly.id()];
        let inside = top.is_some_and(|result| {
            own.contains(&result.surface().id()) || own.contains(&result.leaf().id())
        }) || (volatile.assembly.is_attached()
            && volatile.assembly.is_visible()
            && volatile.assembly.frame().contains(point.x, point.y));
        if inside {
            return None;
        }
        self.close_volatile()
    }

    /// Closes the popup when the given surface is the popup itself or its
    /// assembly (used when either is removed from the HUD).
    pub fn close_volatile_if_owned(&mut self, id: SurfaceId) -> Option<SurfaceHandle> {
        let volatile = self.volatile.as_ref()?;
        if volatile.popup.id() != id && volatile.assembly.id() != id {
            return None;
        }
        self.close_volatile()
    }

    // ------------------------------------------------------------------
    // Dialog stack
    // ------------------------------------------------------------------

    pub fn push_dialog(&mut self, dialog: SurfaceHandle) {
        self.dialogs.push(dialog);
    }

    pub fn remove_dialog(&mut self, id: SurfaceId) {
        self.dialogs.retain(|d| d.id() != id);
    }

    /// The current modal dialog: the topmost stack entry that is both
    /// visible and still attached.
    pub fn current_dialog(&self) -> Option<SurfaceHandle> {
        self.dialogs
            .iter()
            .rev()
            .find(|d| d.is_visible() && d.is_attached())
            .cloned()
    }

    // ------------------------------------------------------------------
    // Context menu
    // ------------------------------------------------------------------

    pub fn set_default_menu(&mut self, menu: Option<MenuHandle>) {
        self.default_menu = menu;
    }

    pub fn set_void_menu_enabled(&mut self, enabled: bool) {
        self.void_menu_enabled = enabled;
    }

    pub fn void_menu_enabled(&self) -> bool {
        self.void_menu_enabled
    }

    pub fn displayed_menu(&self) -> Option<&MenuHandle> {
        self.displayed_menu.as_ref()
    }

    pub fn close_displayed_menu(&mut self) {
        if let Some(menu) = self.displayed_menu.take() {
            menu.hide();
        }
    }

    /// Context-menu resolution, run after every pick with the topmost
    /// result (or none). Only press/release picks can toggle menus; a menu
    /// must not react to move, stop, or wheel picks carrying a stale button.
    pub fn context_menu_check(
        &mut self,
        top: Option<&PickResult>,
        button: MouseButton,
        position: Point,
        reason: PickReason,
    ) {
        if !matches!(
            reason,
            PickReason::ButtonPressed | PickReason::ButtonReleased
        ) {
            return;
        }

        // Effective menu: the picked widget's own, else the HUD default.
        let effective = top
            .and_then(|result| result.leaf().context_menu())
            .or_else(|| self.default_menu.clone());

        if let Some(displayed) = self.displayed_menu.clone() {
            if top.is_some() || self.void_menu_enabled {
                let items = displayed.item_container();
                let inside = top.is_some_and(|result| {
                    is_within(result.leaf(), items.id()) || is_within(result.surface(), items.id())
                });
                if !inside {
                    if button == MouseButton::Secondary {
                        if reason == PickReason::ButtonReleased {
                            let same =
                                effective.as_ref().map(|m| m.id()) == Some(displayed.id());
                            if !same {
                                displayed.hide();
                                self.displayed_menu = None;
                            }
                            if let Some(menu) = effective {
                                menu.show_at(position);
                                self.displayed_menu = Some(menu);
                            }
                        }
                    } else {
                        // Any other button outside the menu dismisses it.
                        displayed.hide();
                        self.displayed_menu = None;
                    }
                }
            } else if effective.is_none() {
                displayed.hide();
                self.displayed_menu = None;
            }
        } else if button == MouseButton::Secondary
            && reason == PickReason::ButtonReleased
            && (top.is_some() || self.void_menu_enabled)
        {
            if let Some(menu) = effective {
                menu.show_at(position);
                self.displayed_menu = Some(menu);
            }
        }
    }
}

impl Default for PopupCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// True when `surface` is `ancestor` or a descendant of it.
fn is_within(surface: &SurfaceHandle, ancestor: SurfaceId) -> bool {
    if surface.id() == ancestor {
        return true;
    }
    let mut current = surface.parent();
    while let Some(node) = current {
        if node.id() == ancestor {
            return true;
        }
        current = node.parent();
    }
    false
}
