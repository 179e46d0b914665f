//! Pick results.
//!
//! A pick result is a plain value describing one surface's answer to a hit
//! test: the surface itself (root of the hit path), the deepest descendant
//! under the point, and a rank used for the topmost-wins comparison. Results
//! are created and returned within a single pick call; nothing is pooled or
//! retained across calls.

use crate::input::{PickFlags, PickReason};
use crate::surface::{Surface, SurfaceHandle};

#[derive(Clone)]
pub struct PickResult {
    surface: SurfaceHandle,
    leaf: SurfaceHandle,
    rank: i32,
    reason: PickReason,
    flags: PickFlags,
}

impl PickResult {
    pub fn new(
        surface: SurfaceHandle,
        leaf: SurfaceHandle,
        rank: i32,
        reason: PickReason,
        flags: PickFlags,
    ) -> Self {
        Self {
            surface,
            leaf,
            rank,
            reason,
            flags,
        }
    }

    /// Convenience for leafless hits: the surface is its own leaf.
    pub fn of_surface(
        surface: SurfaceHandle,
        rank: i32,
        reason: PickReason,
        flags: PickFlags,
    ) -> Self {
        Self::new(surface.clone(), surface, rank, reason, flags)
    }

    /// Root of the hit path.
    pub fn surface(&self) -> &SurfaceHandle {
        &self.surface
    }

    /// Deepest descendant under the pick point.
    pub fn leaf(&self) -> &SurfaceHandle {
        &self.leaf
    }

    pub fn rank(&self) -> i32 {
        self.rank
    }

    pub fn reason(&self) -> PickReason {
        self.reason
    }

    pub fn flags(&self) -> PickFlags {
        self.flags
    }

    /// Topmost-wins comparison. Strictly-higher rank wins; equal ranks are
    /// resolved by the engine's iteration order (later-tested wins).
    pub fn is_above(&self, other: &PickResult) -> bool {
        self.rank > other.rank
    }
}

impl std::fmt::Debug for PickResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickResult")
            .field("surface", &self.surface.id())
            .field("leaf", &self.leaf.id())
            .field("rank", &self.rank)
            .field("reason", &self.reason)
            .field("flags", &self.flags)
            .finish()
    }
}
