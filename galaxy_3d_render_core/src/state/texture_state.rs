/// Textures bound per texture unit.
///
/// The state holds shared logical keys, so a texture stays alive while a
/// state (or a context record of it) binds it.

use std::sync::Arc;
use crate::error::Result;
use crate::engine_bail;
use crate::identity::TextureKey;
use crate::state::StateCommon;
use super::state_type::concrete_state;

/// Highest number of texture units a state can address
pub const MAX_TEXTURE_UNITS: usize = 32;

#[derive(Debug, Clone, Default)]
pub struct TextureState {
    common: StateCommon,
    units: Vec<Option<Arc<TextureKey>>>,
}

concrete_state!(TextureState, Texture);

impl TextureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `texture` to `unit`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `unit >= MAX_TEXTURE_UNITS`.
    pub fn set_texture(&mut self, unit: usize, texture: Arc<TextureKey>) -> Result<()> {
        if unit >= MAX_TEXTURE_UNITS {
            engine_bail!("galaxy3d::TextureState",
                "Texture unit {} out of range (max {})", unit, MAX_TEXTURE_UNITS);
        }
        if self.units.len() <= unit {
            self.units.resize(unit + 1, None);
        }
        self.units[unit] = Some(texture);
        self.common.touch();
        Ok(())
    }

    pub fn texture(&self, unit: usize) -> Option<&Arc<TextureKey>> {
        self.units.get(unit).and_then(|slot| slot.as_ref())
    }

    /// Unbind one unit; returns the previously bound texture.
    pub fn remove_texture(&mut self, unit: usize) -> Option<Arc<TextureKey>> {
        let removed = self.units.get_mut(unit).and_then(|slot| slot.take());
        if removed.is_some() {
            self.common.touch();
        }
        removed
    }

    pub fn clear_textures(&mut self) {
        self.units.clear();
        self.common.touch();
    }

    /// Number of units with a texture bound
    pub fn bound_unit_count(&self) -> usize {
        self.units.iter().filter(|slot| slot.is_some()).count()
    }

    /// (unit, texture) pairs, lowest unit first
    pub fn bound_textures(&self) -> impl Iterator<Item = (usize, &Arc<TextureKey>)> {
        self.units
            .iter()
            .enumerate()
            .filter_map(|(unit, slot)| slot.as_ref().map(|texture| (unit, texture)))
    }
}
