//! Descriptor writer
//!
//! Renders descriptors as appup terms (or JSON) and writes them under
//! `<output_root>/<app>-<to_version>/ebin/`.

#![allow(clippy::result_large_err)]

use crate::atomic::atomic_write;
use crate::term::Term;
use relswap_core::errors::{RelswapError, Result};
use relswap_core::{Descriptor, DescriptorWriter, Instruction};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output syntax for a descriptor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorFormat {
    /// Appup term consumed by the release installer
    #[default]
    Term,
    /// Pretty-printed JSON for tooling
    Json,
}

impl DescriptorFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DescriptorFormat::Term => "appup",
            DescriptorFormat::Json => "json",
        }
    }
}

fn instruction_term(instruction: &Instruction) -> Term {
    match instruction {
        Instruction::AddUnit { id } => {
            Term::Tuple(vec![Term::atom("add_module"), Term::atom(id.as_str())])
        }
        Instruction::LoadUnit { id, deps } => Term::Tuple(vec![
            Term::atom("load_module"),
            Term::atom(id.as_str()),
            Term::List(deps.iter().map(|d| Term::atom(d.as_str())).collect()),
        ]),
        Instruction::DeleteUnit { id } => {
            Term::Tuple(vec![Term::atom("delete_module"), Term::atom(id.as_str())])
        }
    }
}

fn render_section(from_version: &str, sequence: &[Instruction]) -> String {
    let from = Term::string(from_version);
    if sequence.is_empty() {
        return format!("[{{{},[]}}]", from);
    }
    let body = sequence
        .iter()
        .map(|i| instruction_term(i).to_string())
        .collect::<Vec<_>>()
        .join(",\n    ");
    format!("[{{{},\n   [{}]}}]", from, body)
}

/// Render a descriptor as an appup term with a fixed line layout.
///
/// ```text
/// {"0.0.2",
///  [{"0.0.1",
///    [{add_module,c},
///     {load_module,a,[]}]}],
///  [{"0.0.1",
///    [{load_module,a,[]},
///     {delete_module,c}]}]}.
/// ```
pub fn render_appup(descriptor: &Descriptor) -> String {
    format!(
        "{{{},\n {},\n {}}}.\n",
        Term::string(descriptor.to_version()),
        render_section(descriptor.from_version(), descriptor.upgrade()),
        render_section(descriptor.from_version(), descriptor.downgrade()),
    )
}

/// Writes descriptors into a release output tree.
#[derive(Debug, Clone)]
pub struct AppupWriter {
    output_root: PathBuf,
    format: DescriptorFormat,
}

impl AppupWriter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            format: DescriptorFormat::default(),
        }
    }

    pub fn with_format(mut self, format: DescriptorFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Where the descriptor for `app` will be written.
    pub fn target_path(&self, app: &str, descriptor: &Descriptor) -> PathBuf {
        self.output_root
            .join(format!("{}-{}", app, descriptor.to_version()))
            .join("ebin")
            .join(format!("{}.{}", app, self.format.extension()))
    }

    fn check_app(app: &str) -> Result<()> {
        if app.is_empty() || app.contains(['/', '\\']) || app == "." || app == ".." {
            return Err(RelswapError::InvalidInput {
                reason: format!("application name {:?} cannot be used in a path", app),
            }
            .into());
        }
        Ok(())
    }
}

impl DescriptorWriter for AppupWriter {
    fn render(&self, app: &str, descriptor: &Descriptor) -> Result<String> {
        Self::check_app(app)?;
        match self.format {
            DescriptorFormat::Term => Ok(render_appup(descriptor)),
            DescriptorFormat::Json => {
                let mut json = serde_json::to_string_pretty(descriptor)?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    fn write(&self, app: &str, descriptor: &Descriptor) -> Result<PathBuf> {
        let content = self.render(app, descriptor)?;
        let path = self.target_path(app, descriptor);
        atomic_write(&path, content.as_bytes())?;
        tracing::info!(
            app = app,
            path = %path.display(),
            bytes = content.len(),
            "descriptor written"
        );
        Ok(path)
    }
}
