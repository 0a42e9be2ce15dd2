use crate::analysis::ModelInfo;
use crate::fingerprint::ComponentSbom;
use crate::identity::RepoRecord;
use crate::ports::outbound::{
    ModelInfoCatalog, RepoCatalog, SbomCatalog, MAX_TRACKED_PURLS,
};
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

const REPOS_DIR: &str = "repos";
const SBOM_DIR: &str = "sbom";
const MODEL_INFO_DIR: &str = "model_info";
const HASH_INDEX_DIR: &str = "sha256";

/// File-backed catalog: one JSON document per key, grouped in a
/// subdirectory per record kind.
///
/// Keys are identifiers containing `/`, which is swapped for `--` to keep
/// each document a single path component. Clones share the root path, so
/// separate handles see each other's writes through the filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    root: PathBuf,
}

impl JsonFileCatalog {
    /// Opens (and if needed creates) a catalog rooted at `root`.
    pub fn open(root: PathBuf) -> Result<Self> {
        for table in [REPOS_DIR, SBOM_DIR, MODEL_INFO_DIR, HASH_INDEX_DIR] {
            fs::create_dir_all(root.join(table)).with_context(|| {
                format!(
                    "Failed to create catalog directory {}",
                    root.join(table).display()
                )
            })?;
        }
        Ok(Self { root })
    }

    fn document_path(&self, table: &str, key: &str) -> PathBuf {
        let sanitized = key.replace('/', "--");
        self.root.join(table).join(format!("{sanitized}.json"))
    }

    fn load<T: DeserializeOwned>(&self, table: &str, key: &str) -> Result<Option<T>> {
        let path = self.document_path(table, key);
        if !path.exists() {
            return Ok(None);
        }
        validate_not_symlink(&path, "read")?;
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog document {}", path.display()))?;
        let value = serde_json::from_str(&text)
            .with_context(|| format!("Corrupt catalog document {}", path.display()))?;
        Ok(Some(value))
    }

    fn store<T: Serialize>(&self, table: &str, key: &str, value: &T) -> Result<()> {
        let path = self.document_path(table, key);
        if path.exists() {
            validate_not_symlink(&path, "write")?;
        }
        let text = serde_json::to_string(value)?;
        fs::write(&path, text)
            .with_context(|| format!("Failed to write catalog document {}", path.display()))?;
        Ok(())
    }

    fn contains(&self, table: &str, key: &str) -> bool {
        self.document_path(table, key).exists()
    }

    fn keys(&self, table: &str) -> Result<Vec<String>> {
        let dir = self.root.join(table);
        let mut keys = Vec::new();
        for entry in fs::read_dir(&dir)
            .with_context(|| format!("Failed to list catalog directory {}", dir.display()))?
        {
            let name = entry?.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".json") {
                keys.push(stem.replace("--", "/"));
            }
        }
        keys.sort_unstable();
        Ok(keys)
    }

    fn reindex(
        &self,
        purl: &str,
        old_hashes: &HashSet<String>,
        new_hashes: &HashSet<String>,
    ) -> Result<()> {
        for dropped in old_hashes.difference(new_hashes) {
            if let Some(mut tracked) = self.load::<Vec<String>>(HASH_INDEX_DIR, dropped)? {
                tracked.retain(|p| p != purl);
                self.store(HASH_INDEX_DIR, dropped, &tracked)?;
            }
        }
        for added in new_hashes.difference(old_hashes) {
            let mut tracked = self
                .load::<Vec<String>>(HASH_INDEX_DIR, added)?
                .unwrap_or_default();
            if !tracked.iter().any(|p| p == purl) && tracked.len() < MAX_TRACKED_PURLS {
                tracked.push(purl.to_string());
                self.store(HASH_INDEX_DIR, added, &tracked)?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RepoCatalog for JsonFileCatalog {
    async fn get_repo(&self, base_purl: &str) -> Result<Option<RepoRecord>> {
        self.load(REPOS_DIR, base_purl)
    }

    async fn put_repo(&self, record: &RepoRecord) -> Result<()> {
        self.store(REPOS_DIR, &record.base_purl, record)
    }

    async fn repo_exists(&self, base_purl: &str) -> Result<bool> {
        Ok(self.contains(REPOS_DIR, base_purl))
    }
}

#[async_trait]
impl SbomCatalog for JsonFileCatalog {
    async fn get_sbom(&self, purl: &str) -> Result<Option<ComponentSbom>> {
        self.load(SBOM_DIR, purl)
    }

    async fn put_sbom(&self, sbom: &ComponentSbom) -> Result<()> {
        let new_hashes: HashSet<String> = sbom
            .content_hashes()
            .into_iter()
            .map(str::to_string)
            .collect();
        let old_hashes: HashSet<String> = self
            .load::<ComponentSbom>(SBOM_DIR, &sbom.purl)?
            .map(|previous| {
                previous
                    .content_hashes()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        self.reindex(&sbom.purl, &old_hashes, &new_hashes)?;
        self.store(SBOM_DIR, &sbom.purl, sbom)
    }

    async fn sbom_exists(&self, purl: &str) -> Result<bool> {
        Ok(self.contains(SBOM_DIR, purl))
    }

    async fn purls_for_hash(&self, sha256: &str) -> Result<Vec<String>> {
        let mut purls = self
            .load::<Vec<String>>(HASH_INDEX_DIR, sha256)?
            .unwrap_or_default();
        purls.sort_unstable();
        Ok(purls)
    }
}

#[async_trait]
impl ModelInfoCatalog for JsonFileCatalog {
    async fn get_model_info(&self, purl: &str) -> Result<Option<ModelInfo>> {
        self.load(MODEL_INFO_DIR, purl)
    }

    async fn put_model_info(&self, info: &ModelInfo) -> Result<()> {
        self.store(MODEL_INFO_DIR, &info.purl, info)
    }

    async fn model_info_exists(&self, purl: &str) -> Result<bool> {
        Ok(self.contains(MODEL_INFO_DIR, purl))
    }

    async fn model_info_keys(&self) -> Result<Vec<String>> {
        self.keys(MODEL_INFO_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::FileRecord;
    use tempfile::TempDir;

    fn open_catalog(dir: &TempDir) -> JsonFileCatalog {
        JsonFileCatalog::open(dir.path().join("catalog")).unwrap()
    }

    #[tokio::test]
    async fn test_open_creates_table_directories() {
        let dir = TempDir::new().unwrap();
        open_catalog(&dir);
        for table in [REPOS_DIR, SBOM_DIR, MODEL_INFO_DIR, HASH_INDEX_DIR] {
            assert!(dir.path().join("catalog").join(table).is_dir());
        }
    }

    #[tokio::test]
    async fn test_slash_keys_become_single_path_components() {
        let dir = TempDir::new().unwrap();
        let catalog = open_catalog(&dir);
        let record = RepoRecord::new("pkg:huggingface/org/model", "model");
        catalog.put_repo(&record).await.unwrap();

        let expected = dir
            .path()
            .join("catalog")
            .join(REPOS_DIR)
            .join("pkg:huggingface--org--model.json");
        assert!(expected.is_file());
        assert_eq!(
            catalog.get_repo("pkg:huggingface/org/model").await.unwrap(),
            Some(record)
        );
    }

    #[tokio::test]
    async fn test_sbom_round_trip_and_index() {
        let dir = TempDir::new().unwrap();
        let catalog = open_catalog(&dir);
        let hash = "ab".repeat(32);
        let sbom = ComponentSbom::new(
            "pkg:huggingface/org/model@v1",
            vec![FileRecord::new("config.json", 2, hash.clone())],
        );
        catalog.put_sbom(&sbom).await.unwrap();

        assert!(catalog.sbom_exists("pkg:huggingface/org/model@v1").await.unwrap());
        assert_eq!(
            catalog.get_sbom("pkg:huggingface/org/model@v1").await.unwrap(),
            Some(sbom)
        );
        assert_eq!(
            catalog.purls_for_hash(&hash).await.unwrap(),
            vec!["pkg:huggingface/org/model@v1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_rescan_updates_index_on_disk() {
        let dir = TempDir::new().unwrap();
        let catalog = open_catalog(&dir);
        let purl = "pkg:huggingface/org/model@v1";
        let old_hash = "aa".repeat(32);
        let new_hash = "bb".repeat(32);

        catalog
            .put_sbom(&ComponentSbom::new(
                purl,
                vec![FileRecord::new("f", 1, old_hash.clone())],
            ))
            .await
            .unwrap();
        catalog
            .put_sbom(&ComponentSbom::new(
                purl,
                vec![FileRecord::new("f", 1, new_hash.clone())],
            ))
            .await
            .unwrap();

        assert!(catalog.purls_for_hash(&old_hash).await.unwrap().is_empty());
        assert_eq!(
            catalog.purls_for_hash(&new_hash).await.unwrap(),
            vec![purl.to_string()]
        );
    }

    #[tokio::test]
    async fn test_model_info_keys_restore_slashes() {
        let dir = TempDir::new().unwrap();
        let catalog = open_catalog(&dir);
        catalog
            .put_model_info(&ModelInfo::new(
                "pkg:huggingface/org/model@v1",
                "pkg:huggingface/org/model",
                "model",
            ))
            .await
            .unwrap();
        assert_eq!(
            catalog.model_info_keys().await.unwrap(),
            vec!["pkg:huggingface/org/model@v1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_separate_handles_share_documents() {
        let dir = TempDir::new().unwrap();
        let writer = open_catalog(&dir);
        let reader = JsonFileCatalog::open(dir.path().join("catalog")).unwrap();

        writer
            .put_model_info(&ModelInfo::new(
                "pkg:huggingface/org/model@v1",
                "pkg:huggingface/org/model",
                "model",
            ))
            .await
            .unwrap();
        assert!(reader
            .model_info_exists("pkg:huggingface/org/model@v1")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_missing_documents_read_as_none() {
        let dir = TempDir::new().unwrap();
        let catalog = open_catalog(&dir);
        assert_eq!(catalog.get_sbom("pkg:huggingface/no/such@v").await.unwrap(), None);
        assert!(!catalog.repo_exists("pkg:huggingface/no/such").await.unwrap());
    }
}
