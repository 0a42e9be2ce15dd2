use crate::identity::Purl;
use crate::ports::outbound::{CorpusFile, FileCorpus};
use crate::shared::error::AibomError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// Corpus adapter over a local directory of model files.
///
/// Listing walks the tree recursively and reports `/`-separated names
/// relative to the root, in sorted order. Symlinks are skipped outright;
/// a scan of untrusted content must not follow links out of the root.
#[derive(Debug)]
pub struct LocalDirCorpus {
    root: PathBuf,
}

impl LocalDirCorpus {
    pub fn new(root: PathBuf) -> Result<Self> {
        if !root.exists() {
            return Err(AibomError::InvalidScanPath {
                path: root,
                reason: "Directory does not exist".to_string(),
            }
            .into());
        }
        if !root.is_dir() {
            return Err(AibomError::InvalidScanPath {
                path: root,
                reason: "Path is not a directory".to_string(),
            }
            .into());
        }
        Ok(Self { root })
    }

    fn guard_relative_name(&self, relative_name: &str) -> Result<()> {
        let escapes = relative_name.starts_with('/')
            || relative_name
                .split('/')
                .any(|segment| segment == ".." || segment.is_empty());
        if escapes {
            anyhow::bail!(
                "Security: corpus file name {} would escape the corpus root",
                relative_name
            );
        }
        Ok(())
    }
}

fn collect_files(dir: &Path, prefix: &str, names: &mut Vec<String>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        if file_type.is_dir() {
            collect_files(&entry.path(), &relative, names)?;
        } else {
            names.push(relative);
        }
    }
    Ok(())
}

#[async_trait]
impl FileCorpus for LocalDirCorpus {
    async fn list_files(&self, _purl: &Purl) -> Result<Vec<String>> {
        let mut names = Vec::new();
        collect_files(&self.root, "", &mut names)?;
        names.sort_unstable();
        Ok(names)
    }

    async fn fetch_file(&self, _purl: &Purl, relative_name: &str) -> Result<CorpusFile> {
        self.guard_relative_name(relative_name)?;
        let path = self.root.join(relative_name);
        validate_regular_file(&path, "corpus file")?;
        Ok(CorpusFile::local(relative_name, path))
    }
}
