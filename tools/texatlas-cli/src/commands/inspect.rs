//! Show atlas metadata and planned frames.

use std::path::PathBuf;

use texatlas_common::AppConfig;
use texatlas_model::{plan_frames, DescriptorParser};

pub fn run(path: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;

    let descriptor = DescriptorParser::new(config.keys.clone())
        .named(path.display().to_string())
        .parse(&text)
        .map_err(|e| anyhow::anyhow!("Failed to parse atlas: {e}"))?;
    let plan = plan_frames(&descriptor)?;

    println!("Atlas: {}", path.display());
    println!(
        "  Image: {} ({}x{})",
        descriptor.image_file_name, descriptor.image_size.width, descriptor.image_size.height
    );
    if let Some(app) = &descriptor.app {
        println!(
            "  Packer: {} {}",
            app,
            descriptor.version.as_deref().unwrap_or("")
        );
    }
    if let Some(format) = &descriptor.format {
        println!("  Format: {format}");
    }
    if let Some(scale) = &descriptor.scale {
        println!("  Scale: {scale}");
    }
    println!();

    println!("Frames ({}):", plan.len());
    for p in &plan {
        let rect = p.frame.pixel_rect;
        println!(
            "  {:<24} {:<32} px({}, {}, {}x{})  uv[{:.4}, {:.4}] - [{:.4}, {:.4}]{}{}",
            p.identifier.generated_name,
            p.identifier.source_file_name,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            p.uv.u_min,
            p.uv.v_min,
            p.uv.u_max,
            p.uv.v_max,
            if p.frame.rotated { " (rotated)" } else { "" },
            if p.frame.trimmed { " (trimmed)" } else { "" },
        );
    }

    Ok(())
}
