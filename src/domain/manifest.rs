//! Rendered files and the ordered list of descriptors handed to the launcher.

use std::path::{Path, PathBuf};

use crate::domain::{AppError, TemplateGroup};

/// A rendered file written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub destination: PathBuf,
    pub content: String,
}

/// Descriptor paths in rendering order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub group: TemplateGroup,
    pub path: PathBuf,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: TemplateGroup, path: PathBuf) {
        self.entries.push(ManifestEntry { group, path });
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|entry| entry.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A group that was not rendered, with the reason.
#[derive(Debug)]
pub struct SkippedGroup {
    pub group: TemplateGroup,
    pub error: AppError,
}

impl SkippedGroup {
    /// Missing templates skip their group without telling the operator.
    pub fn is_silent(&self) -> bool {
        matches!(self.error, AppError::MissingTemplate(_))
    }
}
