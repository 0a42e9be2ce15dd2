use aibom::prelude::*;
use async_trait::async_trait;
use std::fs;
use tempfile::TempDir;

/// Mock FileCorpus serving fixture files from its own temp directory
///
/// Files are added with `with_file`; listing reports them in sorted
/// order like the real corpora. The backing directory lives as long as
/// the mock does.
pub struct MockCorpus {
    root: TempDir,
    names: Vec<String>,
}

impl MockCorpus {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create mock corpus directory"),
            names: Vec::new(),
        }
    }

    pub fn with_file(mut self, name: &str, content: &[u8]) -> Self {
        let path = self.root.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create mock corpus subdirectory");
        }
        fs::write(&path, content).expect("Failed to write mock corpus file");
        self.names.push(name.to_string());
        self.names.sort();
        self
    }
}

impl Default for MockCorpus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileCorpus for MockCorpus {
    async fn list_files(&self, _purl: &Purl) -> Result<Vec<String>> {
        Ok(self.names.clone())
    }

    async fn fetch_file(&self, _purl: &Purl, relative_name: &str) -> Result<CorpusFile> {
        Ok(CorpusFile::local(
            relative_name,
            self.root.path().join(relative_name),
        ))
    }
}
