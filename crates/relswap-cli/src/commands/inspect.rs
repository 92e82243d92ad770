//! Build directory inspection command

use clap::Args;
use relswap_core::errors::RelswapError;
use relswap_core::{ArtifactStore, CompiledUnit, ExError, UnitId};
use relswap_store::fs_store::RESOURCE_EXTENSION;
use relswap_store::FsArtifactStore;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Build directory containing ebin/
    pub dir: PathBuf,

    /// Application name (defaults to the only resource file in ebin/)
    #[arg(long)]
    pub name: Option<String>,

    /// Show only this unit
    #[arg(long)]
    pub unit: Option<String>,
}

/// The application whose resource file is the only one in `ebin/`.
fn discover_app(dir: &Path) -> Result<String, ExError> {
    let ebin = FsArtifactStore::ebin(dir);
    let entries = std::fs::read_dir(&ebin).map_err(|e| {
        ExError::from(RelswapError::ArtifactRead {
            path: ebin.display().to_string(),
            reason: e.to_string(),
        })
    })?;

    let mut apps: Vec<String> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(RESOURCE_EXTENSION))
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
        .collect();
    apps.sort();

    match apps.as_slice() {
        [app] => Ok(app.clone()),
        [] => Err(RelswapError::InvalidInput {
            reason: format!("no .{} file in {}", RESOURCE_EXTENSION, ebin.display()),
        }
        .into()),
        _ => Err(RelswapError::InvalidInput {
            reason: format!(
                "several applications in {} ({}); pass --name",
                ebin.display(),
                apps.join(", ")
            ),
        }
        .into()),
    }
}

fn print_unit(unit: &CompiledUnit) {
    let chunks: Vec<&str> = unit.chunks().keys().map(|k| k.as_str()).collect();
    let refs: Vec<&str> = unit.references().iter().map(UnitId::as_str).collect();

    println!("{}", unit.id());
    println!("  digest: {}", unit.digest());
    println!("  size: {} bytes", unit.bytes().len());
    println!("  chunks: {}", chunks.join(", "));
    if refs.is_empty() {
        println!("  references: (none)");
    } else {
        println!("  references: {}", refs.join(", "));
    }
}

pub fn execute(args: InspectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let app = match args.name {
        Some(name) => name,
        None => discover_app(&args.dir)?,
    };
    let store = FsArtifactStore::new(&app);
    let version = store.read_version(&args.dir)?;

    let ids = match args.unit {
        Some(unit) => vec![UnitId::new(unit)],
        None => store.list_unit_ids(&args.dir)?.into_iter().collect(),
    };

    println!("Application: {}", app);
    println!("Version: {}", version);
    println!("Units: {}", ids.len());
    for id in &ids {
        println!();
        print_unit(&store.read_unit(&args.dir, id)?);
    }

    Ok(())
}
