//! Focus ownership and directional focus movement.
//!
//! Exactly one surface (or none) holds focus per HUD instance. Transfers
//! follow the lose-then-gain protocol; directional movement is driven by
//! configurable device-component bindings and delegated to the focused
//! leaf's container.

use smallvec::{smallvec, SmallVec};

use scrim_foundation::{
    DeviceComponent, FocusDirection, KeyCode, Surface, SurfaceHandle, SurfaceId,
};

type ComponentList = SmallVec<[DeviceComponent; 2]>;

/// Bindings from device components to the five focus-move directions. Each
/// direction accepts any number of components; the defaults are the arrow
/// keys, with Tab driving NEXT.
#[derive(Clone, Debug)]
pub struct FocusBindings {
    up: ComponentList,
    down: ComponentList,
    left: ComponentList,
    right: ComponentList,
    next: ComponentList,
}

impl Default for FocusBindings {
    fn default() -> Self {
        Self {
            up: smallvec![DeviceComponent::Key(KeyCode::ArrowUp)],
            down: smallvec![DeviceComponent::Key(KeyCode::ArrowDown)],
            left: smallvec![DeviceComponent::Key(KeyCode::ArrowLeft)],
            right: smallvec![DeviceComponent::Key(KeyCode::ArrowRight)],
            next: smallvec![DeviceComponent::Key(KeyCode::Tab)],
        }
    }
}

impl FocusBindings {
    fn list_mut(&mut self, direction: FocusDirection) -> &mut ComponentList {
        match direction {
            FocusDirection::Up => &mut self.up,
            FocusDirection::Down => &mut self.down,
            FocusDirection::Left => &mut self.left,
            FocusDirection::Right => &mut self.right,
            FocusDirection::Next => &mut self.next,
        }
    }

    /// Adds a component binding for a direction.
    pub fn bind(&mut self, direction: FocusDirection, component: DeviceComponent) {
        let list = self.list_mut(direction);
        if !list.contains(&component) {
            list.push(component);
        }
    }

    /// Replaces all bindings of a direction.
    pub fn rebind(&mut self, direction: FocusDirection, components: &[DeviceComponent]) {
        let list = self.list_mut(direction);
        list.clear();
        list.extend_from_slice(components);
    }

    /// Resolves the direction (if any) a component is bound to.
    pub fn direction_for(&self, component: &DeviceComponent) -> Option<FocusDirection> {
        let lists = [
            (FocusDirection::Up, &self.up),
            (FocusDirection::Down, &self.down),
            (FocusDirection::Left, &self.left),
            (FocusDirection::Right, &self.right),
            (FocusDirection::Next, &self.next),
        ];
        lists
            .into_iter()
            .find(|(_, list)| list.contains(component))
            .map(|(direction, _)| direction)
    }
}

pub struct FocusManager {
    current: Option<SurfaceHandle>,
    bindings: FocusBindings,
}

impl FocusManager {
    pub fn new() -> Self {
        Self {
            current: None,
            bindings: FocusBindings::default(),
        }
    }

    pub fn bindings_mut(&mut self) -> &mut FocusBindings {
        &mut self.bindings
    }

    pub fn current(&self) -> Option<&SurfaceHandle> {
        self.current.as_ref()
    }

    pub fn current_id(&self) -> Option<SurfaceId> {
        self.current.as_ref().map(|s| s.id())
    }

    pub fn is_current(&self, id: SurfaceId) -> bool {
        self.current_id() == Some(id)
    }

    /// Transfers focus, returning the previously focused surface.
    ///
    /// A target that is a window's content pane redirects to the owning
    /// window. Focusing the current surface, or one that is not focusable,
    /// is a no-op.
    pub fn focus(&mut self, target: Option<SurfaceHandle>) -> Option<SurfaceHandle> {
        let target = target.map(|t| t.window_for_content_pane().unwrap_or(t));
        let previous = self.current.clone();

        match &target {
            Some(t) => {
                if self.is_current(t.id()) {
                    return previous;
                }
                if !t.is_focusable() {
                    log::debug!("surface #{} is not focusable, focus unchanged", t.id());
                    return previous;
                }
            }
            None => {
                if previous.is_none() {
                    return None;
                }
            }
        }

        if let Some(old) = &previous {
            old.on_focus_lost();
        }
        self.current = target;
        if let Some(new) = &self.current {
            new.on_focus_gained();
        }
        previous
    }

    /// The focused surface; with `leaf` set, resolved through container
    /// focus chains to the deepest focused descendant (falling back to the
    /// container itself when it reports none).
    pub fn current_focused(&self, leaf: bool) -> Option<SurfaceHandle> {
        let current = self.current.clone()?;
        if leaf {
            if let Some(container) = current.as_container() {
                return Some(container.focused_child(true).unwrap_or_else(|| current.clone()));
            }
        }
        Some(current)
    }

    /// Handles a device-component state change and moves focus when the
    /// component is bound to a direction.
    ///
    /// Only digital components transitioning to active (delta > 0) qualify;
    /// analog components never move focus. The focused leaf's immediate
    /// container may block specific components (e.g. a text field claiming
    /// arrow keys), and ultimately decides how focus moves.
    pub fn component_changed(&mut self, component: &DeviceComponent, delta: f32) -> bool {
        if component.is_analog() || delta <= 0.0 {
            return false;
        }
        let Some(leaf) = self.current_focused(true) else {
            return false;
        };
        let parent = leaf.parent();
        // A top-level focused container acts as its own movement host.
        let host = parent.as_ref().unwrap_or(&leaf);
        let Some(container) = host.as_container() else {
            return false;
        };
        if container.blocks_focus_component(component) {
            log::trace!(
                "container #{} blocks focus component {component:?}",
                host.id()
            );
            return false;
        }
        let Some(direction) = self.bindings.direction_for(component) else {
            return false;
        };
        container.move_focus(direction)
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}
