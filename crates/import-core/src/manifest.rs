//! In-memory asset sink.
//!
//! [`ManifestSink`] stands in for a host engine: it records every asset it
//! is asked to create in an [`AssetManifest`] that can be written to JSON
//! and loaded back for a later reimport.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use texatlas_common::{TexAtlasError, TexAtlasResult};
use texatlas_model::{sanitize_package_name, strip_extension, UniqueNames};

use crate::atlas::TextureAtlas;
use crate::sink::{AssetRef, AssetSink, DataRow, FrameMaterialParams, SlateTextureParams};

/// Everything a [`ManifestSink`] has created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub textures: Vec<TextureRecord>,
    #[serde(default)]
    pub materials: Vec<MaterialRecord>,
    #[serde(default)]
    pub slate_textures: Vec<SlateTextureRecord>,
    #[serde(default)]
    pub data_tables: Vec<DataTableRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureRecord {
    pub asset: AssetRef,
    pub source: PathBuf,
    /// Times the texture was refreshed after its first import.
    #[serde(default)]
    pub reimports: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub asset: AssetRef,
    pub params: FrameMaterialParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlateTextureRecord {
    pub asset: AssetRef,
    pub params: SlateTextureParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTableRecord {
    pub asset: AssetRef,
    #[serde(default)]
    pub rows: Vec<DataTableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTableRow {
    pub name: String,
    pub row: DataRow,
}

impl AssetManifest {
    /// Every asset in the manifest.
    pub fn assets(&self) -> impl Iterator<Item = &AssetRef> {
        self.textures
            .iter()
            .map(|t| &t.asset)
            .chain(self.materials.iter().map(|m| &m.asset))
            .chain(self.slate_textures.iter().map(|s| &s.asset))
            .chain(self.data_tables.iter().map(|d| &d.asset))
    }

    pub fn asset_count(&self) -> usize {
        self.assets().count()
    }

    pub fn data_table(&self, asset: &AssetRef) -> Option<&DataTableRecord> {
        self.data_tables.iter().find(|d| &d.asset == asset)
    }

    pub fn material(&self, asset: &AssetRef) -> Option<&MaterialRecord> {
        self.materials.iter().find(|m| &m.asset == asset)
    }

    pub fn slate_texture(&self, asset: &AssetRef) -> Option<&SlateTextureRecord> {
        self.slate_textures.iter().find(|s| &s.asset == asset)
    }
}

/// An [`AssetSink`] that keeps everything in memory.
#[derive(Debug, Clone)]
pub struct ManifestSink {
    manifest: AssetManifest,
    packages: UniqueNames,
}

impl Default for ManifestSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestSink {
    pub fn new() -> Self {
        Self {
            manifest: AssetManifest::default(),
            packages: UniqueNames::with_separator("_"),
        }
    }

    /// Continue from a saved manifest; existing package names stay taken.
    pub fn from_manifest(manifest: AssetManifest) -> Self {
        let mut packages = UniqueNames::with_separator("_");
        for asset in manifest.assets() {
            packages.insert(asset.package.clone());
        }
        Self { manifest, packages }
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    pub fn into_manifest(self) -> AssetManifest {
        self.manifest
    }

    /// Sanitized, unique `<target_path>/<name>` package.
    fn new_asset(&mut self, target_path: &str, desired_name: &str) -> AssetRef {
        let target_path = target_path.trim_end_matches('/');
        let base = format!("{target_path}/{}", sanitize_package_name(desired_name));
        let package = self.packages.claim(&base);
        let name = package
            .rsplit('/')
            .next()
            .unwrap_or(package.as_str())
            .to_string();
        AssetRef::new(package, name)
    }

    fn data_table_mut(&mut self, table: &AssetRef) -> TexAtlasResult<&mut DataTableRecord> {
        self.manifest
            .data_tables
            .iter_mut()
            .find(|d| &d.asset == table)
            .ok_or_else(|| TexAtlasError::sink(format!("unknown data table {table}")))
    }
}

impl AssetSink for ManifestSink {
    fn import_texture(&mut self, source: &Path, target_path: &str) -> TexAtlasResult<AssetRef> {
        if !source.exists() {
            return Err(TexAtlasError::FileNotFound {
                path: source.to_path_buf(),
            });
        }
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| TexAtlasError::texture(format!("{} has no file name", source.display())))?;

        let asset = self.new_asset(target_path, strip_extension(&file_name));
        self.manifest.textures.push(TextureRecord {
            asset: asset.clone(),
            source: source.to_path_buf(),
            reimports: 0,
        });
        Ok(asset)
    }

    fn reimport_texture(&mut self, existing: &AssetRef) -> TexAtlasResult<bool> {
        let Some(record) = self
            .manifest
            .textures
            .iter_mut()
            .find(|t| &t.asset == existing)
        else {
            return Ok(false);
        };
        if !record.source.exists() {
            return Ok(false);
        }
        record.reimports += 1;
        Ok(true)
    }

    fn create_material_asset(
        &mut self,
        target_path: &str,
        name: &str,
        params: &FrameMaterialParams,
    ) -> TexAtlasResult<AssetRef> {
        let asset = self.new_asset(target_path, name);
        self.manifest.materials.push(MaterialRecord {
            asset: asset.clone(),
            params: params.clone(),
        });
        Ok(asset)
    }

    fn update_material_asset(
        &mut self,
        existing: &AssetRef,
        params: &FrameMaterialParams,
    ) -> TexAtlasResult<()> {
        let record = self
            .manifest
            .materials
            .iter_mut()
            .find(|m| &m.asset == existing)
            .ok_or_else(|| TexAtlasError::sink(format!("unknown material {existing}")))?;
        record.params = params.clone();
        Ok(())
    }

    fn create_slate_texture(
        &mut self,
        target_path: &str,
        name: &str,
        params: &SlateTextureParams,
    ) -> TexAtlasResult<AssetRef> {
        let asset = self.new_asset(target_path, name);
        self.manifest.slate_textures.push(SlateTextureRecord {
            asset: asset.clone(),
            params: params.clone(),
        });
        Ok(asset)
    }

    fn update_slate_texture(
        &mut self,
        existing: &AssetRef,
        params: &SlateTextureParams,
    ) -> TexAtlasResult<()> {
        let record = self
            .manifest
            .slate_textures
            .iter_mut()
            .find(|s| &s.asset == existing)
            .ok_or_else(|| TexAtlasError::sink(format!("unknown slate texture {existing}")))?;
        record.params = params.clone();
        Ok(())
    }

    fn create_data_table(&mut self, target_path: &str, name: &str) -> TexAtlasResult<AssetRef> {
        let asset = self.new_asset(target_path, name);
        self.manifest.data_tables.push(DataTableRecord {
            asset: asset.clone(),
            rows: Vec::new(),
        });
        Ok(asset)
    }

    fn clear_data_table(&mut self, table: &AssetRef) -> TexAtlasResult<()> {
        self.data_table_mut(table)?.rows.clear();
        Ok(())
    }

    fn create_data_row(
        &mut self,
        table: &AssetRef,
        row_name: &str,
        row: &DataRow,
    ) -> TexAtlasResult<()> {
        let record = self.data_table_mut(table)?;
        // Same name replaces the row, as engine data tables do.
        match record.rows.iter_mut().find(|r| r.name == row_name) {
            Some(existing) => existing.row = row.clone(),
            None => record.rows.push(DataTableRow {
                name: row_name.to_string(),
                row: row.clone(),
            }),
        }
        Ok(())
    }
}

/// An imported atlas together with the manifest of its assets, as written
/// to `<name>.atlas.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRecord {
    pub atlas: TextureAtlas,
    pub manifest: AssetManifest,
}

impl ImportRecord {
    pub fn load(path: impl AsRef<Path>) -> TexAtlasResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TexAtlasError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> TexAtlasResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
