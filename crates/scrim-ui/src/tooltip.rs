//! Tooltip display, caching, and movement-gated disposal.
//!
//! A tooltip surface is built lazily, once per source widget, by the
//! configured factory, then cached and reused. At most one tooltip is
//! displayed at a time. Display is triggered by a mouse-stop pick over a
//! widget declaring tooltip content; disposal happens once the cursor has
//! left the source widget and strayed far enough from the trigger point.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use scrim_foundation::{Surface, SurfaceHandle, SurfaceId};
use scrim_ui_graphics::{Point, Size};

use crate::hud::TOOLTIP_Z;

/// Builds a tooltip surface for a source widget. The result must be
/// heavyweight; returning anything else is a fatal configuration error.
pub type TooltipFactory = Rc<dyn Fn(&SurfaceHandle) -> SurfaceHandle>;

/// Where a tooltip appears relative to the trigger point.
const TOOLTIP_OFFSET: Point = Point::new(0.0, 18.0);

struct DisplayedTooltip {
    source: SurfaceId,
    tooltip: SurfaceHandle,
    trigger: Point,
}

pub struct ToolTipController {
    factory: Option<TooltipFactory>,
    cache: FxHashMap<SurfaceId, SurfaceHandle>,
    displayed: Option<DisplayedTooltip>,
}

impl ToolTipController {
    pub fn new() -> Self {
        Self {
            factory: None,
            cache: FxHashMap::default(),
            displayed: None,
        }
    }

    pub fn set_factory(&mut self, factory: Option<TooltipFactory>) {
        self.factory = factory;
    }

    pub fn displayed_tooltip(&self) -> Option<&SurfaceHandle> {
        self.displayed.as_ref().map(|d| &d.tooltip)
    }

    /// Display evaluation for the leaf under a stopped mouse. No-op when
    /// the widget declares no tooltip content, no factory is configured, or
    /// the widget's tooltip is already showing. Returns true when a new
    /// tooltip was attached.
    pub fn evaluate(&mut self, leaf: &SurfaceHandle, position: Point) -> bool {
        if leaf.tooltip_text().is_none() {
            return false;
        }
        let Some(factory) = self.factory.clone() else {
            return false;
        };
        if self.displayed.as_ref().map(|d| d.source) == Some(leaf.id()) {
            return false;
        }

        let tooltip = self
            .cache
            .entry(leaf.id())
            .or_insert_with(|| {
                let tooltip = factory(leaf);
                assert!(
                    tooltip.is_heavyweight(),
                    "tooltip factory must produce a heavyweight surface (source #{})",
                    leaf.id()
                );
                tooltip
            })
            .clone();

        self.dispose();
        tooltip.set_origin(position + TOOLTIP_OFFSET);
        tooltip.set_z_index(TOOLTIP_Z);
        tooltip.set_attached(true);
        log::debug!("tooltip shown for surface #{}", leaf.id());
        self.displayed = Some(DisplayedTooltip {
            source: leaf.id(),
            tooltip,
            trigger: position,
        });
        true
    }

    /// Movement re-check: once the cursor is off the source widget and has
    /// strayed more than 1/16 of the HUD width or 1/12 of its height from
    /// the trigger point, the tooltip is disposed. Returns the disposed
    /// tooltip, if any.
    pub fn handle_motion(
        &mut self,
        under_cursor: Option<SurfaceId>,
        position: Point,
        space: Size,
    ) -> Option<SurfaceHandle> {
        let displayed = self.displayed.as_ref()?;
        if under_cursor == Some(displayed.source) {
            return None;
        }
        let dx = (position.x - displayed.trigger.x).abs();
        let dy = (position.y - displayed.trigger.y).abs();
        if dx <= space.width / 16.0 && dy <= space.height / 12.0 {
            return None;
        }
        self.dispose()
    }

    /// Detaches the displayed tooltip, if any. The cached surface stays
    /// cached for reuse.
    pub fn dispose(&mut self) -> Option<SurfaceHandle> {
        let displayed = self.displayed.take()?;
        displayed.tooltip.set_attached(false);
        log::debug!("tooltip for surface #{} disposed", displayed.source);
        Some(displayed.tooltip)
    }
}

impl Default for ToolTipController {
    fn default() -> Self {
        Self::new()
    }
}
