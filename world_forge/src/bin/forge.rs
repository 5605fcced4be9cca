//! Forge a world document into a witness-able world configuration.
//!
//! Usage: forge <world.json> [config.toml]

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use world_forge::{ForgeConfig, SourceDocument, SourceIngestor, WorldConfigAssembler};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("world_forge=info".parse()?))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(source_path) = args.next().map(PathBuf::from) else {
        bail!("usage: forge <world.json> [config.toml]");
    };
    let config = match args.next() {
        Some(path) => ForgeConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => ForgeConfig::default(),
    };

    let document = SourceDocument::load(&source_path)
        .with_context(|| format!("loading {}", source_path.display()))?;
    info!(
        world = document.name.as_deref().unwrap_or("Unknown"),
        elements = document.elements.len(),
        "Loaded world document"
    );

    let source = SourceIngestor::ingest(&document);
    let forged = WorldConfigAssembler::new(config).forge(&source);

    info!(
        rulers = forged.analysis.power_structure.rulers.len(),
        conflicts = forged.analysis.conflicts.len(),
        witness = forged.config.witness.name.as_str(),
        skipped = source.skipped,
        "Analysis complete"
    );

    let output = output_path(&source_path);
    std::fs::write(&output, forged.config.to_json_pretty()?)
        .with_context(|| format!("writing {}", output.display()))?;

    println!("Witness: {} ({:?})", forged.config.witness.name, forged.config.witness.size);
    println!("Resources: {:?}", forged.config.resources);
    println!("Degradation: {}", forged.config.degradation.stages.join(" -> "));
    println!("Hidden truth: {}", forged.config.hidden_truth);
    println!("Configuration saved to {}", output.display());

    Ok(())
}

fn output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "world".to_string());
    source.with_file_name(format!("{stem}_world_config.json"))
}
