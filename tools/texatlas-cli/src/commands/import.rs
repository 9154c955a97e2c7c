//! Import an atlas into an asset manifest.

use std::path::{Path, PathBuf};

use texatlas_common::AppConfig;
use texatlas_import::{AtlasImporter, ImportRecord, ImportRequest, ManifestSink, TextureAtlas};

pub fn run(
    path: PathBuf,
    package: String,
    name: Option<String>,
    out: PathBuf,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let atlas_name = match name {
        Some(name) => name,
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow::anyhow!("Cannot derive an atlas name from {}", path.display()))?,
    };

    // Absolute, so `reimport` works from any directory.
    let source_file = std::fs::canonicalize(&path).unwrap_or(path);
    let request = ImportRequest {
        atlas_name,
        source_file,
        package_path: package,
        text,
    };

    let mut sink = ManifestSink::new();
    let atlas = AtlasImporter::new(&config.import, &mut sink)
        .with_keys(config.keys.clone())
        .import(&request, None)
        .map_err(|e| anyhow::anyhow!("Import failed: {e}"))?;

    let record_path = out.join(format!("{}.atlas.json", atlas.name));
    let record = ImportRecord {
        atlas,
        manifest: sink.into_manifest(),
    };
    record
        .save(&record_path)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", record_path.display()))?;

    print_summary(&record, &record_path);
    Ok(())
}

/// Shared with `reimport`.
pub fn print_summary(record: &ImportRecord, record_path: &Path) {
    let atlas: &TextureAtlas = &record.atlas;

    println!("Atlas '{}' imported into {}", atlas.name, atlas.package_path);
    match &atlas.texture {
        Some(texture) => println!("  Texture: {texture}"),
        None => println!("  Texture: <not imported> ({})", atlas.texture_name),
    }
    println!("  Frames: {}", atlas.frames.len());
    println!("  Materials: {}", atlas.materials().count());
    println!("  Slate textures: {}", atlas.slate_textures().count());
    if let Some(table) = &atlas.table {
        println!("  Data table: {table}");
    }
    println!("  Assets in manifest: {}", record.manifest.asset_count());
    println!();
    println!("Record written to {}", record_path.display());
}
