use std::path::{Path, PathBuf};

use texatlas_common::{ImportSettings, KeyMapping};
use texatlas_import::{
    AtlasImporter, ImportError, ImportRecord, ImportRequest, ManifestSink, ReimportContext,
};
use texatlas_model::AtlasError;

fn fixture_text() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("hud")
        .join("hud.json");
    std::fs::read_to_string(path).expect("fixture descriptor should be readable")
}

/// Fresh directory holding the fixture descriptor and a stand-in image.
fn staged_atlas(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("texatlas_test_{test_name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("hud.json"), fixture_text()).unwrap();
    std::fs::write(dir.join("hud.png"), b"not really a png").unwrap();
    dir
}

fn request(dir: &Path) -> ImportRequest {
    ImportRequest {
        atlas_name: "hud".to_string(),
        source_file: dir.join("hud.json"),
        package_path: "/Game/UI".to_string(),
        text: fixture_text(),
    }
}

#[test]
fn fresh_import_creates_every_asset() {
    texatlas_common::logging::init_default_logging();
    let dir = staged_atlas("fresh_import");
    let settings = ImportSettings::default();
    let mut sink = ManifestSink::new();

    let atlas = AtlasImporter::new(&settings, &mut sink)
        .import(&request(&dir), None)
        .unwrap();

    assert_eq!(atlas.texture_name, "hud.png");
    let texture = atlas.texture.clone().expect("atlas image should import");
    assert_eq!(texture.package, "/Game/UI/Textures/hud");
    assert_eq!(atlas.frames.len(), 5);
    assert_eq!(atlas.materials().count(), 5);
    assert_eq!(atlas.slate_textures().count(), 5);

    let coin = atlas.frame("icons/coin.png").unwrap();
    assert_eq!(coin.row_name, "_iconsCoin");
    let coin_material = coin.material.as_ref().unwrap();
    assert_eq!(coin_material.package, "/Game/UI/Frames/MIA_hud_icons_coin_png");

    let manifest = sink.manifest();
    let record = manifest.material(coin_material).unwrap();
    assert_eq!(record.params.frame_uv, [0.0, 0.125, 0.25, 0.5]);
    assert_eq!(record.params.atlas.as_ref(), Some(&texture));
    assert_eq!(record.params.parent, settings.frame_material);

    let slate = manifest
        .slate_texture(coin.slate_texture.as_ref().unwrap())
        .unwrap();
    assert_eq!(slate.params.start_uv, (0.0, 0.25));
    assert_eq!(slate.params.size_uv, (0.125, 0.25));

    let table = manifest.data_table(atlas.table.as_ref().unwrap()).unwrap();
    assert_eq!(table.asset.name, "hud_DataTable");
    let rows: Vec<_> = table.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        rows,
        vec![
            "_buttonNormal",
            "_buttonHover",
            "_iconsCoin",
            "_iconsCoin1",
            "_healthBarFill"
        ]
    );
    assert_eq!(table.rows[2].row.material.as_ref(), Some(coin_material));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn reimport_reuses_existing_assets() {
    let dir = staged_atlas("reimport");
    let settings = ImportSettings::default();
    let mut sink = ManifestSink::new();

    let first = AtlasImporter::new(&settings, &mut sink)
        .import(&request(&dir), None)
        .unwrap();
    let assets_after_first = sink.manifest().asset_count();

    // Round-trip through the on-disk record like the CLI does.
    let record_path = dir.join("out").join("hud.atlas.json");
    ImportRecord {
        atlas: first.clone(),
        manifest: sink.into_manifest(),
    }
    .save(&record_path)
    .unwrap();
    let record = ImportRecord::load(&record_path).unwrap();

    let ctx = ReimportContext::from_atlas(&record.atlas);
    let mut sink = ManifestSink::from_manifest(record.manifest);
    let second = AtlasImporter::new(&settings, &mut sink)
        .import(&request(&dir), Some(&ctx))
        .unwrap();

    assert_eq!(sink.manifest().asset_count(), assets_after_first);
    assert_eq!(second.texture, first.texture);
    assert_eq!(second.table, first.table);
    for (a, b) in first.frames.iter().zip(&second.frames) {
        assert_eq!(a.material, b.material);
        assert_eq!(a.slate_texture, b.slate_texture);
    }
    assert_eq!(sink.manifest().textures[0].reimports, 1);

    let table = sink.manifest().data_table(second.table.as_ref().unwrap()).unwrap();
    assert_eq!(table.rows.len(), 5);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn reimport_creates_assets_for_new_frames() {
    let dir = staged_atlas("reimport_new_frame");
    let settings = ImportSettings::default();
    let mut sink = ManifestSink::new();
    let first = AtlasImporter::new(&settings, &mut sink)
        .import(&request(&dir), None)
        .unwrap();

    let mut trimmed = first.clone();
    trimmed.frames.retain(|f| f.name != "health_bar_fill.png");
    let ctx = ReimportContext::from_atlas(&trimmed);

    let before = sink.manifest().materials.len();
    let second = AtlasImporter::new(&settings, &mut sink)
        .import(&request(&dir), Some(&ctx))
        .unwrap();

    assert_eq!(sink.manifest().materials.len(), before + 1);
    let bar = second.frame("health_bar_fill.png").unwrap();
    assert_eq!(bar.material.as_ref().unwrap().name, "MIA_hud_health_bar_fill_png_1");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn generation_switches_are_honoured() {
    let dir = staged_atlas("switches");
    let settings = ImportSettings {
        generate_material_instances: false,
        generate_slate_textures: false,
        ..ImportSettings::default()
    };
    let mut sink = ManifestSink::new();

    let atlas = AtlasImporter::new(&settings, &mut sink)
        .import(&request(&dir), None)
        .unwrap();

    assert_eq!(atlas.materials().count(), 0);
    assert_eq!(atlas.slate_textures().count(), 0);
    let table = sink.manifest().data_table(atlas.table.as_ref().unwrap()).unwrap();
    assert_eq!(table.rows.len(), 5);
    assert!(table.rows.iter().all(|r| r.row.material.is_none()));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_image_still_imports_frames() {
    let dir = staged_atlas("missing_image");
    std::fs::remove_file(dir.join("hud.png")).unwrap();
    let settings = ImportSettings::default();
    let mut sink = ManifestSink::new();

    let atlas = AtlasImporter::new(&settings, &mut sink)
        .import(&request(&dir), None)
        .unwrap();

    assert!(atlas.texture.is_none());
    assert_eq!(atlas.materials().count(), 5);
    assert!(sink
        .manifest()
        .materials
        .iter()
        .all(|m| m.params.atlas.is_none()));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn broken_descriptor_creates_nothing() {
    let settings = ImportSettings::default();
    let mut sink = ManifestSink::new();
    let mut importer = AtlasImporter::new(&settings, &mut sink);

    let mut req = request(Path::new("/nonexistent"));
    req.text = String::new();
    assert!(matches!(
        importer.import(&req, None),
        Err(ImportError::Descriptor(AtlasError::EmptyInput))
    ));

    req.text = "{ \"frames\": [".to_string();
    assert!(!importer.can_import(&req.text));
    assert!(matches!(
        importer.import(&req, None),
        Err(ImportError::Descriptor(AtlasError::Malformed { .. }))
    ));

    assert_eq!(sink.manifest().asset_count(), 0);
}

#[test]
fn custom_keys_reach_the_parser() {
    let settings = ImportSettings::default();
    let mut sink = ManifestSink::new();
    let keys = KeyMapping {
        frames: "sprites".to_string(),
        ..KeyMapping::default()
    };
    let importer = AtlasImporter::new(&settings, &mut sink).with_keys(keys);

    let renamed = fixture_text().replacen("\"frames\"", "\"sprites\"", 1);
    assert!(importer.can_import(&renamed));
    assert!(!importer.can_import(&fixture_text()));
}

#[test]
fn reimport_keeps_frames_that_share_a_filename() {
    let dir = staged_atlas("shared_filename");
    let text = r#"{
        "frames": [
            { "filename": "a.png", "frame": { "x": 0, "y": 0, "w": 1, "h": 1 } },
            { "filename": "a.png", "frame": { "x": 1, "y": 0, "w": 1, "h": 1 } }
        ],
        "meta": { "image": "hud.png", "size": { "w": 2, "h": 1 } }
    }"#;
    let req = ImportRequest {
        text: text.to_string(),
        ..request(&dir)
    };
    let settings = ImportSettings::default();
    let mut sink = ManifestSink::new();

    let first = AtlasImporter::new(&settings, &mut sink)
        .import(&req, None)
        .unwrap();
    let rows: Vec<_> = first.frames.iter().map(|f| f.row_name.as_str()).collect();
    assert_eq!(rows, vec!["_a", "_a1"]);
    assert_ne!(first.frames[0].material, first.frames[1].material);
    assert_ne!(first.frames[0].slate_texture, first.frames[1].slate_texture);
    let assets_after_first = sink.manifest().asset_count();

    let ctx = ReimportContext::from_atlas(&first);
    let second = AtlasImporter::new(&settings, &mut sink)
        .import(&req, Some(&ctx))
        .unwrap();

    assert_eq!(sink.manifest().asset_count(), assets_after_first);
    for (a, b) in first.frames.iter().zip(&second.frames) {
        assert_eq!(a.material, b.material);
        assert_eq!(a.slate_texture, b.slate_texture);
    }

    let right = sink
        .manifest()
        .material(second.frames[1].material.as_ref().unwrap())
        .unwrap();
    assert_eq!(right.params.frame_uv, [0.5, 1.0, 0.0, 1.0]);

    std::fs::remove_dir_all(&dir).ok();
}
