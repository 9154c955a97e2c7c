//! One import pass over an atlas descriptor.
//!
//! # Steps
//!
//! 1. **Parse** the descriptor and plan every frame (identifier + UVs).
//! 2. **Texture**: reimport the previous atlas image when it came from the
//!    same file, otherwise import `<descriptor dir>/<meta.image>`.
//! 3. **Frames**: reuse or create one material instance and one UI texture
//!    per frame, then push the frame's parameters to them.
//! 4. **Data table**: reuse (cleared) or create `<atlas>_DataTable` and add
//!    one row per frame, named by the generated identifier.

use std::path::{Path, PathBuf};

use texatlas_common::{ImportSettings, KeyMapping, TexAtlasError};
use texatlas_model::{
    data_table_name, frame_material_name, plan_frames, slate_texture_name, AtlasError,
    DescriptorParser, FramePlan,
};

use crate::atlas::{AtlasFrame, TextureAtlas};
use crate::reimport::ReimportContext;
use crate::sink::{AssetRef, AssetSink, DataRow, FrameMaterialParams, SlateTextureParams};

/// What to import and where.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Atlas asset name; prefixes every generated asset name.
    pub atlas_name: String,

    /// Descriptor path. Only its directory is used, to locate the image.
    pub source_file: PathBuf,

    /// Package directory for the atlas (e.g. `/Game/UI`).
    pub package_path: String,

    /// Descriptor contents.
    pub text: String,
}

impl ImportRequest {
    /// Atlas image path next to the descriptor.
    pub fn image_path(&self, image_file_name: &str) -> PathBuf {
        self.source_file
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(image_file_name)
    }
}

/// Errors that abort an import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to read atlas descriptor: {0}")]
    Descriptor(#[from] AtlasError),

    #[error(transparent)]
    Sink(#[from] TexAtlasError),
}

/// Drives an [`AssetSink`] through one import.
pub struct AtlasImporter<'a, S: AssetSink> {
    settings: &'a ImportSettings,
    parser: DescriptorParser,
    sink: &'a mut S,
}

impl<'a, S: AssetSink> AtlasImporter<'a, S> {
    pub fn new(settings: &'a ImportSettings, sink: &'a mut S) -> Self {
        Self {
            settings,
            parser: DescriptorParser::default(),
            sink,
        }
    }

    /// Read descriptors with a custom key mapping.
    pub fn with_keys(mut self, keys: KeyMapping) -> Self {
        self.parser = DescriptorParser::new(keys);
        self
    }

    /// Silent probe with this importer's key mapping.
    pub fn can_import(&self, text: &str) -> bool {
        self.parser.can_import(text)
    }

    /// Run one import. With a `reimport` context, existing assets are
    /// updated in place instead of created.
    pub fn import(
        &mut self,
        request: &ImportRequest,
        reimport: Option<&ReimportContext>,
    ) -> Result<TextureAtlas, ImportError> {
        let descriptor = self
            .parser
            .clone()
            .named(&request.atlas_name)
            .parse(&request.text)?;
        let plan = plan_frames(&descriptor)?;

        let package = request.package_path.trim_end_matches('/');
        let textures_path = format!("{package}/{}", self.settings.textures_subdir);
        let frames_path = format!("{package}/{}", self.settings.frames_subdir);

        tracing::info!(
            atlas = %request.atlas_name,
            frames = plan.len(),
            reimport = reimport.is_some(),
            "Importing texture atlas"
        );

        let image_path = request.image_path(&descriptor.image_file_name);
        let existing_texture = reimport.and_then(|ctx| ctx.texture_for(&descriptor.image_file_name));
        let texture = self.import_or_reimport_texture(existing_texture, &image_path, &textures_path);

        let mut frames = Vec::with_capacity(plan.len());
        for planned in &plan {
            frames.push(self.import_frame(
                planned,
                &request.atlas_name,
                &frames_path,
                texture.as_ref(),
                reimport,
            )?);
        }

        let existing_table = reimport.and_then(|ctx| ctx.table.as_ref());
        let table =
            self.import_or_reimport_data_table(existing_table, package, &request.atlas_name, &frames)?;

        tracing::info!(
            atlas = %request.atlas_name,
            materials = frames.iter().filter(|f| f.material.is_some()).count(),
            slate_textures = frames.iter().filter(|f| f.slate_texture.is_some()).count(),
            "Texture atlas imported"
        );

        Ok(TextureAtlas {
            name: request.atlas_name.clone(),
            source_file: request.source_file.clone(),
            package_path: package.to_string(),
            texture_name: descriptor.image_file_name.clone(),
            texture,
            frames,
            table: Some(table),
            imported_data: descriptor,
            imported_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// A failed texture import is not fatal; frames are still generated
    /// without an atlas texture bound.
    fn import_or_reimport_texture(
        &mut self,
        existing: Option<&AssetRef>,
        source: &Path,
        target_path: &str,
    ) -> Option<AssetRef> {
        if let Some(existing) = existing {
            match self.sink.reimport_texture(existing) {
                Ok(true) => return Some(existing.clone()),
                Ok(false) => {
                    tracing::debug!(texture = %existing, "Texture reimport declined, importing anew")
                }
                Err(err) => {
                    tracing::warn!(texture = %existing, error = %err, "Texture reimport failed")
                }
            }
        }

        match self.sink.import_texture(source, target_path) {
            Ok(texture) => Some(texture),
            Err(err) => {
                tracing::warn!(
                    path = %source.display(),
                    error = %err,
                    "Failed to import atlas image"
                );
                None
            }
        }
    }

    fn import_frame(
        &mut self,
        planned: &FramePlan,
        atlas_name: &str,
        frames_path: &str,
        texture: Option<&AssetRef>,
        reimport: Option<&ReimportContext>,
    ) -> Result<AtlasFrame, ImportError> {
        let frame_name = &planned.frame.source_file_name;
        let row_name = &planned.identifier.generated_name;

        let mut material = None;
        let mut slate_texture = None;
        if let Some(ctx) = reimport {
            material = ctx.existing_frame(row_name).cloned();
            if material.is_none() {
                tracing::error!(
                    frame = %frame_name,
                    row = %row_name,
                    "Failed to find existing frame material"
                );
            }
            slate_texture = ctx.existing_slate_texture(row_name).cloned();
            if slate_texture.is_none() {
                tracing::error!(
                    frame = %frame_name,
                    row = %row_name,
                    "Failed to find existing slate texture"
                );
            }
        }

        let material_params = FrameMaterialParams {
            parent: self.settings.frame_material.clone(),
            atlas: texture.cloned(),
            frame_uv: planned.uv.as_linear_color(),
        };
        let material = match material {
            Some(existing) => {
                self.sink.update_material_asset(&existing, &material_params)?;
                Some(existing)
            }
            None if self.settings.generate_material_instances => {
                Some(self.sink.create_material_asset(
                    frames_path,
                    &frame_material_name(atlas_name, frame_name),
                    &material_params,
                )?)
            }
            None => None,
        };

        let slate_params = SlateTextureParams {
            atlas: texture.cloned(),
            start_uv: planned.uv.start_uv(),
            size_uv: planned.uv.size_uv(),
        };
        let slate_texture = match slate_texture {
            Some(existing) => {
                self.sink.update_slate_texture(&existing, &slate_params)?;
                Some(existing)
            }
            None if self.settings.generate_slate_textures => Some(self.sink.create_slate_texture(
                frames_path,
                &slate_texture_name(atlas_name, frame_name),
                &slate_params,
            )?),
            None => None,
        };

        tracing::debug!(
            frame = %frame_name,
            row = %row_name,
            uv = ?planned.uv.as_linear_color(),
            "Imported atlas frame"
        );

        Ok(AtlasFrame {
            name: frame_name.clone(),
            row_name: row_name.clone(),
            uv: planned.uv,
            material,
            slate_texture,
        })
    }

    fn import_or_reimport_data_table(
        &mut self,
        existing: Option<&AssetRef>,
        package: &str,
        atlas_name: &str,
        frames: &[AtlasFrame],
    ) -> Result<AssetRef, ImportError> {
        let table = match existing {
            Some(table) => {
                self.sink.clear_data_table(table)?;
                table.clone()
            }
            None => self
                .sink
                .create_data_table(package, &data_table_name(atlas_name))?,
        };

        for frame in frames {
            let row = DataRow {
                material: frame.material.clone(),
                slate_texture: frame.slate_texture.clone(),
            };
            self.sink.create_data_row(&table, &frame.row_name, &row)?;
        }

        Ok(table)
    }
}
