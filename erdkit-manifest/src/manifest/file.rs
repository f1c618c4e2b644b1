use std::path::{Path, PathBuf};

use erdkit_core::Namespace;

use super::Manifest;
use crate::Result;

/// An erd.toml file with both raw content and parsed manifest.
#[derive(Debug)]
pub struct ErdToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl ErdToml {
    /// Default manifest file name.
    pub const FILENAME: &'static str = "erd.toml";

    /// Open and parse an erd.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Shortcut for `manifest().namespace()`.
    pub fn namespace(&self) -> &Namespace {
        self.manifest.namespace()
    }
}
