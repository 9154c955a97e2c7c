//! Assets carried over from a previous import.
//!
//! A context is built from the atlas record of the earlier import and
//! passed into [`AtlasImporter::import`](crate::AtlasImporter::import). It
//! is read-only; nothing survives between import calls except what the
//! caller keeps.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::atlas::TextureAtlas;
use crate::sink::AssetRef;

/// A texture from a previous import and the image it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingTexture {
    pub image_name: String,
    pub asset: AssetRef,
}

/// Existing assets keyed by data-table row name.
///
/// Row names are unique within an atlas while source filenames need not be.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReimportContext {
    pub texture: Option<ExistingTexture>,
    pub frames: HashMap<String, AssetRef>,
    pub slate_textures: HashMap<String, AssetRef>,
    pub table: Option<AssetRef>,
}

impl ReimportContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every asset a previous import produced.
    pub fn from_atlas(atlas: &TextureAtlas) -> Self {
        let mut ctx = Self {
            texture: atlas.texture.as_ref().map(|asset| ExistingTexture {
                image_name: atlas.texture_name.clone(),
                asset: asset.clone(),
            }),
            table: atlas.table.clone(),
            ..Self::default()
        };

        for frame in &atlas.frames {
            if let Some(material) = &frame.material {
                ctx.frames.insert(frame.row_name.clone(), material.clone());
            }
            if let Some(slate) = &frame.slate_texture {
                ctx.slate_textures.insert(frame.row_name.clone(), slate.clone());
            }
        }

        ctx
    }

    /// The previous texture, if it was imported from `image_name`.
    pub fn texture_for(&self, image_name: &str) -> Option<&AssetRef> {
        self.texture
            .as_ref()
            .filter(|t| t.image_name == image_name)
            .map(|t| &t.asset)
    }

    pub fn existing_frame(&self, row_name: &str) -> Option<&AssetRef> {
        self.frames.get(row_name)
    }

    pub fn existing_slate_texture(&self, row_name: &str) -> Option<&AssetRef> {
        self.slate_textures.get(row_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::AtlasFrame;
    use texatlas_model::{AtlasDescriptor, ImageSize, NormalizedFrame};

    fn atlas_with_frames(frames: Vec<AtlasFrame>) -> TextureAtlas {
        TextureAtlas {
            name: "hud".to_string(),
            source_file: "hud.json".into(),
            package_path: "/Game/UI".to_string(),
            texture_name: "hud.png".to_string(),
            texture: Some(AssetRef::new("/Game/UI/Textures/hud", "hud")),
            frames,
            table: Some(AssetRef::new("/Game/UI/hud_DataTable", "hud_DataTable")),
            imported_data: AtlasDescriptor::new("hud.png", ImageSize::new(4, 4), vec![]),
            imported_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_from_atlas_collects_assets() {
        let atlas = atlas_with_frames(vec![
            AtlasFrame {
                name: "coin.png".to_string(),
                row_name: "_coin".to_string(),
                uv: NormalizedFrame::FULL,
                material: Some(AssetRef::new("/Game/UI/Frames/MIA_hud_coin_png", "MIA_hud_coin_png")),
                slate_texture: None,
            },
            AtlasFrame {
                name: "gem.png".to_string(),
                row_name: "_gem".to_string(),
                uv: NormalizedFrame::FULL,
                material: None,
                slate_texture: Some(AssetRef::new("/Game/UI/Frames/ST_hud_gem_png", "ST_hud_gem_png")),
            },
        ]);

        let ctx = ReimportContext::from_atlas(&atlas);
        assert!(ctx.existing_frame("_coin").is_some());
        assert!(ctx.existing_frame("_gem").is_none());
        assert!(ctx.existing_slate_texture("_gem").is_some());
        assert!(ctx.existing_frame("coin.png").is_none());
        assert!(ctx.table.is_some());
    }

    #[test]
    fn test_shared_filename_keeps_both_frames() {
        let frame = |row: &str, material: &str| AtlasFrame {
            name: "a.png".to_string(),
            row_name: row.to_string(),
            uv: NormalizedFrame::FULL,
            material: Some(AssetRef::new(format!("/Game/UI/Frames/{material}"), material)),
            slate_texture: None,
        };
        let atlas = atlas_with_frames(vec![
            frame("_a", "MIA_hud_a_png"),
            frame("_a1", "MIA_hud_a_png_1"),
        ]);

        let ctx = ReimportContext::from_atlas(&atlas);
        assert_eq!(ctx.frames.len(), 2);
        assert_eq!(ctx.existing_frame("_a").unwrap().name, "MIA_hud_a_png");
        assert_eq!(ctx.existing_frame("_a1").unwrap().name, "MIA_hud_a_png_1");
    }

    #[test]
    fn test_texture_only_matches_same_image() {
        let ctx = ReimportContext::from_atlas(&atlas_with_frames(vec![]));
        assert!(ctx.texture_for("hud.png").is_some());
        assert!(ctx.texture_for("hud@2x.png").is_none());
        assert!(ReimportContext::new().texture_for("hud.png").is_none());
    }
}
