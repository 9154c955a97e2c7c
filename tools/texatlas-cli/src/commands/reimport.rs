//! Re-run a previous import, updating its assets in place.

use std::path::PathBuf;

use texatlas_common::AppConfig;
use texatlas_import::{AtlasImporter, ImportRecord, ImportRequest, ManifestSink, ReimportContext};

use super::import::print_summary;

pub fn run(record_path: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    let previous = ImportRecord::load(&record_path)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {e}", record_path.display()))?;

    let source_file = previous.atlas.source_file.clone();
    let text = std::fs::read_to_string(&source_file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", source_file.display()))?;

    let ctx = ReimportContext::from_atlas(&previous.atlas);
    let request = ImportRequest {
        atlas_name: previous.atlas.name.clone(),
        source_file,
        package_path: previous.atlas.package_path.clone(),
        text,
    };

    let mut sink = ManifestSink::from_manifest(previous.manifest);
    let atlas = AtlasImporter::new(&config.import, &mut sink)
        .with_keys(config.keys.clone())
        .import(&request, Some(&ctx))
        .map_err(|e| anyhow::anyhow!("Reimport failed: {e}"))?;

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
