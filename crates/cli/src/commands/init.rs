//! Initialize .artefactum.toml configuration

use anyhow::Result;
use artefactum_core::config::CONFIG_FILENAME;
use artefactum_core::ArtefactumConfig;
use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<()> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(CONFIG_FILENAME);

    if config_path.exists() {
        println!("⚠️  {} already exists at {:?}", CONFIG_FILENAME, config_path);
        return Ok(());
    }

    let config = ArtefactumConfig::default();
    config.save(&config_path)?;

    println!("✅ Created {} at {:?}", CONFIG_FILENAME, config_path);
    println!("\nSet api.secret (or ARTEFACTUM_API_SECRET) and run:");
    println!("  artefactum --domain example.com check");

    Ok(())
}
