//! The imported atlas record.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use texatlas_model::{AtlasDescriptor, NormalizedFrame};

use crate::sink::AssetRef;

/// Result of one import pass: which host assets belong to the atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureAtlas {
    /// Atlas asset name.
    pub name: String,

    /// Descriptor file the atlas was imported from.
    pub source_file: PathBuf,

    /// Package directory the atlas was imported into.
    pub package_path: String,

    /// Atlas image filename as written in the descriptor.
    pub texture_name: String,

    /// Imported atlas image, if the import succeeded.
    pub texture: Option<AssetRef>,

    /// Frames in descriptor order.
    pub frames: Vec<AtlasFrame>,

    /// Data table holding one row per frame.
    pub table: Option<AssetRef>,

    /// Descriptor as parsed during this import.
    pub imported_data: AtlasDescriptor,

    /// Import timestamp (RFC 3339).
    pub imported_at: String,
}

/// One frame and the assets generated for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasFrame {
    /// Source filename from the descriptor.
    pub name: String,

    /// Data-table row name.
    pub row_name: String,

    pub uv: NormalizedFrame,

    pub material: Option<AssetRef>,

    pub slate_texture: Option<AssetRef>,
}

impl TextureAtlas {
    /// Look a frame up by its source filename.
    pub fn frame(&self, name: &str) -> Option<&AtlasFrame> {
        self.frames.iter().find(|f| f.name == name)
    }

    pub fn materials(&self) -> impl Iterator<Item = &AssetRef> {
        self.frames.iter().filter_map(|f| f.material.as_ref())
    }

    pub fn slate_textures(&self) -> impl Iterator<Item = &AssetRef> {
        self.frames.iter().filter_map(|f| f.slate_texture.as_ref())
    }
}
