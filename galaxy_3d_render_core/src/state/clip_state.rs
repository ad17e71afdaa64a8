/// User clip planes handed to the driver (distinct from the camera's
/// culling planes, which never reach the driver).

use glam::DVec4;
use crate::error::Result;
use crate::engine_bail;
use crate::state::StateCommon;
use super::state_type::concrete_state;

/// Number of driver clip planes
pub const MAX_CLIP_PLANES: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct ClipState {
    common: StateCommon,
    enabled_planes: [bool; MAX_CLIP_PLANES],
    equations: [DVec4; MAX_CLIP_PLANES],
}

concrete_state!(ClipState, Clip);

impl ClipState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable one clip plane.
    pub fn set_enable_clip_plane(&mut self, index: usize, enabled: bool) -> Result<()> {
        Self::check_index(index)?;
        self.enabled_planes[index] = enabled;
        self.common.touch();
        Ok(())
    }

    /// Set one plane equation as (a, b, c, d) with `ax + by + cz + d >= 0` kept.
    pub fn set_clip_plane_equation(&mut self, index: usize, equation: DVec4) -> Result<()> {
        Self::check_index(index)?;
        self.equations[index] = equation;
        self.common.touch();
        Ok(())
    }

    pub fn is_clip_plane_enabled(&self, index: usize) -> bool {
        self.enabled_planes.get(index).copied().unwrap_or(false)
    }

    pub fn clip_plane_equation(&self, index: usize) -> Option<DVec4> {
        self.equations.get(index).copied()
    }

    /// Number of enabled planes
    pub fn plane_count(&self) -> usize {
        self.enabled_planes.iter().filter(|enabled| **enabled).count()
    }

    fn check_index(index: usize) -> Result<()> {
        if index >= MAX_CLIP_PLANES {
            engine_bail!("galaxy3d::ClipState",
                "Clip plane index {} out of range (max {})", index, MAX_CLIP_PLANES);
        }
        Ok(())
    }
}
