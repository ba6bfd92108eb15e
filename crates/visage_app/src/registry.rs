//! Registry of coexisting capture surfaces

use crate::error::{BridgeError, Result};
use crate::surface::CaptureSurface;
use slotmap::{new_key_type, SlotMap};
use tracing::debug;

new_key_type! {
    /// Generational handle to a registered surface
    pub struct SurfaceId;
}

/// Owns every capture surface of the host, one session each
pub struct SurfaceRegistry {
    surfaces: SlotMap<SurfaceId, CaptureSurface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self {
            surfaces: SlotMap::with_key(),
        }
    }

    /// Take ownership of a surface
    pub fn insert(&mut self, surface: CaptureSurface) -> SurfaceId {
        self.surfaces.insert(surface)
    }

    pub fn get(&self, id: SurfaceId) -> Option<&CaptureSurface> {
        self.surfaces.get(id)
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut CaptureSurface> {
        self.surfaces.get_mut(id)
    }

    /// Apply a visibility flag to one surface
    pub fn set_visible(&mut self, id: SurfaceId, visible: bool) -> Result<()> {
        self.surfaces
            .get_mut(id)
            .ok_or(BridgeError::UnknownSurface)?
            .set_visible(visible)
    }

    /// Remove a surface; a mounted one is cancelled as it drops
    pub fn remove(&mut self, id: SurfaceId) -> Option<CaptureSurface> {
        self.surfaces.remove(id)
    }

    /// Unmount every surface, keeping them registered
    pub fn unmount_all(&mut self) {
        for (id, surface) in self.surfaces.iter_mut() {
            if surface.is_mounted() {
                debug!(?id, "unmounting surface");
                surface.unmount();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl Default for SurfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
