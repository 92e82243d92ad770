//! Descriptor generation command

use crate::config::{self, Overrides};
use clap::{Args, ValueEnum};
use relswap_core::errors::RelswapError;
use relswap_core::{
    generate_descriptor, render_human_summary, DescriptorWriter, ExError, PlanOptions,
    PlanRequest,
};
use relswap_store::{AppupWriter, DescriptorFormat, FsArtifactStore};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Term,
    Json,
}

impl From<FormatArg> for DescriptorFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Term => DescriptorFormat::Term,
            FormatArg::Json => DescriptorFormat::Json,
        }
    }
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Application name
    #[arg(long)]
    pub name: String,

    /// Version the running system is on
    #[arg(long)]
    pub from: String,

    /// Version to move to
    #[arg(long)]
    pub to: String,

    /// Build directory declaring --from
    #[arg(long)]
    pub from_dir: PathBuf,

    /// Build directory declaring --to
    #[arg(long)]
    pub to_dir: PathBuf,

    /// Root of the release output tree
    #[arg(long)]
    pub output_root: Option<PathBuf>,

    /// Chunk tag whose differences are not runtime-observable (repeatable)
    #[arg(long = "ignore-chunk", value_name = "TAG")]
    pub ignore_chunks: Vec<String>,

    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Compare units on the calling thread only
    #[arg(long)]
    pub sequential: bool,

    /// Print the descriptor instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Print a human-readable summary of the plan
    #[arg(long)]
    pub summary: bool,

    /// Configuration file (defaults to ./relswap.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.from_dir == args.to_dir {
        let err: ExError = RelswapError::InvalidInput {
            reason: "--from-dir and --to-dir name the same directory".to_string(),
        }
        .into();
        return Err(err.into());
    }

    let file = config::load(args.config.as_deref())?;
    let settings = config::resolve(
        file,
        Overrides {
            output_root: args.output_root,
            ignored_chunks: args.ignore_chunks,
            sequential: args.sequential,
            format: args.format.map(DescriptorFormat::from),
        },
    )?;

    let store = FsArtifactStore::new(&args.name);
    let request = PlanRequest {
        from_version: args.from,
        to_version: args.to,
        from_dir: args.from_dir,
        to_dir: args.to_dir,
    };
    let options = PlanOptions {
        policy: settings.policy,
        parallelism: settings.parallelism,
    };
    let outcome = generate_descriptor(&store, &request, &options)?;

    let writer = AppupWriter::new(settings.output_root).with_format(settings.format);
    if args.dry_run {
        print!("{}", writer.render(&args.name, &outcome.descriptor)?);
    } else {
        let path = writer.write(&args.name, &outcome.descriptor)?;
        println!("Descriptor written: {}", path.display());
    }

    if args.summary {
        println!();
        print!("{}", render_human_summary(&outcome));
    }

    Ok(())
}
