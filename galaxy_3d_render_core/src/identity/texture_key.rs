/// Texture descriptors.

use crate::identity::{KeyDescriptor, LogicalKey, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFormat {
    #[default]
    Rgba8,
    Rgb8,
    Alpha8,
    Luminance8,
    LuminanceAlpha8,
    Depth24,
    Rgba16F,
    Rgba32F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MinificationFilter {
    NearestNeighborNoMipMaps,
    BilinearNoMipMaps,
    NearestNeighborNearestMipMap,
    BilinearNearestMipMap,
    NearestNeighborLinearMipMap,
    #[default]
    Trilinear,
}

/// What makes two textures the same logical texture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TextureKeyDesc {
    /// Origin of the image data (path, URL, ...); `None` for generated textures
    pub source: Option<String>,
    pub flip_vertically: bool,
    pub format: TextureFormat,
    pub min_filter: MinificationFilter,
    /// Disambiguates generated textures with no source
    pub id: u64,
}

impl TextureKeyDesc {
    /// Descriptor for an image loaded from `source` with default settings
    pub fn from_source(source: &str) -> Self {
        Self {
            source: Some(source.to_string()),
            ..Self::default()
        }
    }
}

impl KeyDescriptor for TextureKeyDesc {
    const KIND: ResourceKind = ResourceKind::Texture;
}

/// Logical texture
pub type TextureKey = LogicalKey<TextureKeyDesc>;
