//! Per-frame draw toggles

use bitflags::bitflags;

bitflags! {
    /// Toggles read by the draw traversal, usually driven by the UI layer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DrawFlags: u32 {
        /// Filled polygons; wireframe when unset
        const FILL = 1 << 0;
        /// Skip entities and groups whose bounding sphere is outside the frustum
        const CULL = 1 << 1;
        /// World axes at the origin
        const SHOW_AXES = 1 << 2;
        /// Entity and group bounding spheres
        const SHOW_BOUNDING_SPHERES = 1 << 3;
        /// Animated translation paths
        const SHOW_ANIMATION_PATHS = 1 << 4;
        /// Vertex normals of drawn meshes
        const SHOW_NORMALS = 1 << 5;
    }
}

impl Default for DrawFlags {
    fn default() -> Self {
        Self::FILL | Self::CULL
    }
}

impl DrawFlags {
    /// True when culling is enabled
    pub fn culling(self) -> bool {
        self.contains(Self::CULL)
    }
}
