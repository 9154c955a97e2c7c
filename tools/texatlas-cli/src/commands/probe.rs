//! Check whether a descriptor can be imported.

use std::path::PathBuf;

use texatlas_common::AppConfig;
use texatlas_model::DescriptorParser;

pub fn run(path: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    let importable = match std::fs::read_to_string(&path) {
        Ok(text) => DescriptorParser::new(config.keys.clone()).can_import(&text),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Descriptor unreadable");
            false
        }
    };

    if importable {
        println!("[OK] {} can be imported", path.display());
        Ok(())
    } else {
        anyhow::bail!("{} is not an importable texture atlas", path.display())
    }
}
