//! The host boundary.
//!
//! Everything engine-specific (packages, asset registries, material
//! parameters, texture import) happens behind [`AssetSink`]. The importer
//! only decides *what* to create and hands over names and parameters.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use texatlas_common::TexAtlasResult;

/// Handle to an asset owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    /// Long package name (e.g. `/Game/UI/Frames/MIA_hud_coin`).
    pub package: String,
    /// Object name inside the package.
    pub name: String,
}

impl AssetRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// `<package>.<name>`
    pub fn object_path(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// Parameters of a per-frame material instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMaterialParams {
    /// Object path of the parent material.
    pub parent: String,
    /// Value of the `Atlas` texture parameter.
    pub atlas: Option<AssetRef>,
    /// Value of the `FrameUV` vector parameter: `[u_min, u_max, v_min, v_max]`.
    pub frame_uv: [f64; 4],
}

/// Parameters of a per-frame UI texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlateTextureParams {
    pub atlas: Option<AssetRef>,
    pub start_uv: (f64, f64),
    pub size_uv: (f64, f64),
}

/// One data-table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRow {
    pub material: Option<AssetRef>,
    pub slate_texture: Option<AssetRef>,
}

/// Asset creation as provided by the host.
///
/// `target_path` arguments are package directories such as
/// `/Game/UI/Frames`. `create_*` methods receive a desired name and must
/// return the name they actually used; hosts are expected to sanitize it
/// and make it unique.
pub trait AssetSink {
    /// Import an image file as a texture.
    fn import_texture(&mut self, source: &Path, target_path: &str) -> TexAtlasResult<AssetRef>;

    /// Refresh a previously imported texture from its source.
    /// `Ok(false)` means the host declined and a fresh import should follow.
    fn reimport_texture(&mut self, existing: &AssetRef) -> TexAtlasResult<bool>;

    fn create_material_asset(
        &mut self,
        target_path: &str,
        name: &str,
        params: &FrameMaterialParams,
    ) -> TexAtlasResult<AssetRef>;

    fn update_material_asset(
        &mut self,
        existing: &AssetRef,
        params: &FrameMaterialParams,
    ) -> TexAtlasResult<()>;

    fn create_slate_texture(
        &mut self,
        target_path: &str,
        name: &str,
        params: &SlateTextureParams,
    ) -> TexAtlasResult<AssetRef>;

    fn update_slate_texture(
        &mut self,
        existing: &AssetRef,
        params: &SlateTextureParams,
    ) -> TexAtlasResult<()>;

    fn create_data_table(&mut self, target_path: &str, name: &str) -> TexAtlasResult<AssetRef>;

    /// Remove every row of `table`.
    fn clear_data_table(&mut self, table: &AssetRef) -> TexAtlasResult<()>;

    fn create_data_row(
        &mut self,
        table: &AssetRef,
        row_name: &str,
        row: &DataRow,
    ) -> TexAtlasResult<()>;
}
