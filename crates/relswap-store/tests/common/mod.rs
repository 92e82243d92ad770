use relswap_store::UnitBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A build directory laid out on disk under a temp root.
pub struct BuildFixture {
    pub dir: PathBuf,
    app: String,
}

#[allow(dead_code)]
impl BuildFixture {
    /// Create `<root>/<name>/ebin/<app>.app` declaring `version`.
    pub fn new(root: &Path, name: &str, app: &str, version: &str) -> Self {
        let dir = root.join(name);
        fs::create_dir_all(dir.join("ebin")).expect("create ebin");
        fs::write(
            dir.join("ebin").join(format!("{app}.app")),
            format!(
                "{{application, {app},\n [{{description, \"fixture\"}},\n  {{vsn, \"{version}\"}},\n  {{modules, []}}]}}.\n"
            ),
        )
        .expect("write app file");
        Self {
            dir,
            app: app.to_string(),
        }
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    /// Write a unit with a code payload, a debug-info payload, and imports.
    pub fn unit(&self, name: &str, code: &str, debug_info: &str, imports: &[&str]) -> &Self {
        let mut builder = UnitBuilder::new(name);
        for module in imports {
            builder = builder.import(module, "call", 1);
        }
        let bytes = builder
            .chunk("Code", code.as_bytes())
            .chunk("Dbgi", debug_info.as_bytes())
            .build();
        self.raw(name, &bytes)
    }

    /// Write arbitrary bytes as `<name>.beam`.
    pub fn raw(&self, name: &str, bytes: &[u8]) -> &Self {
        fs::write(self.dir.join("ebin").join(format!("{name}.beam")), bytes).expect("write unit");
        self
    }
}

#[allow(dead_code)]
pub fn temp_root() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}
