use crate::analysis::ModelInfo;
use crate::fingerprint::ComponentSbom;
use crate::identity::RepoRecord;
use crate::ports::outbound::{
    ModelInfoCatalog, RepoCatalog, SbomCatalog, MAX_TRACKED_PURLS,
};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;

/// In-memory catalog backing all three catalog ports.
///
/// Clones share state (the maps sit behind `Arc`), so one catalog can be
/// handed to several use cases the same way a `reqwest::Client` is.
/// Serves as the default backend for tests and for ad-hoc scans that
/// never touch disk.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    repos: Arc<DashMap<String, RepoRecord>>,
    sboms: Arc<DashMap<String, ComponentSbom>>,
    model_infos: Arc<DashMap<String, ModelInfo>>,
    hash_index: Arc<DashMap<String, Vec<String>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct hashes in the reverse index (for tests)
    #[cfg(test)]
    pub fn indexed_hash_count(&self) -> usize {
        self.hash_index.len()
    }

    fn reindex(&self, purl: &str, old_hashes: &HashSet<String>, new_hashes: &HashSet<String>) {
        for dropped in old_hashes.difference(new_hashes) {
            if let Some(mut tracked) = self.hash_index.get_mut(dropped) {
                tracked.retain(|p| p != purl);
            }
        }
        for added in new_hashes.difference(old_hashes) {
            let mut tracked = self.hash_index.entry(added.clone()).or_default();
            if !tracked.iter().any(|p| p == purl) && tracked.len() < MAX_TRACKED_PURLS {
                tracked.push(purl.to_string());
            }
        }
    }
}

#[async_trait]
impl RepoCatalog for InMemoryCatalog {
    async fn get_repo(&self, base_purl: &str) -> Result<Option<RepoRecord>> {
        Ok(self.repos.get(base_purl).map(|r| r.clone()))
    }

    async fn put_repo(&self, record: &RepoRecord) -> Result<()> {
        self.repos.insert(record.base_purl.clone(), record.clone());
        Ok(())
    }

    async fn repo_exists(&self, base_purl: &str) -> Result<bool> {
        Ok(self.repos.contains_key(base_purl))
    }
}

#[async_trait]
impl SbomCatalog for InMemoryCatalog {
    async fn get_sbom(&self, purl: &str) -> Result<Option<ComponentSbom>> {
        Ok(self.sboms.get(purl).map(|s| s.clone()))
    }

    async fn put_sbom(&self, sbom: &ComponentSbom) -> Result<()> {
        let new_hashes: HashSet<String> = sbom
            .content_hashes()
            .into_iter()
            .map(str::to_string)
            .collect();
        let old_hashes: HashSet<String> = self
            .sboms
            .get(&sbom.purl)
            .map(|previous| {
                previous
                    .content_hashes()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        self.reindex(&sbom.purl, &old_hashes, &new_hashes);
        self.sboms.insert(sbom.purl.clone(), sbom.clone());
        Ok(())
    }

    async fn sbom_exists(&self, purl: &str) -> Result<bool> {
        Ok(self.sboms.contains_key(purl))
    }

    async fn purls_for_hash(&self, sha256: &str) -> Result<Vec<String>> {
        let mut purls = self
            .hash_index
            .get(sha256)
            .map(|tracked| tracked.clone())
            .unwrap_or_default();
        purls.sort_unstable();
        Ok(purls)
    }
}

#[async_trait]
impl ModelInfoCatalog for InMemoryCatalog {
    async fn get_model_info(&self, purl: &str) -> Result<Option<ModelInfo>> {
        Ok(self.model_infos.get(purl).map(|i| i.clone()))
    }

    async fn put_model_info(&self, info: &ModelInfo) -> Result<()> {
        self.model_infos.insert(info.purl.clone(), info.clone());
        Ok(())
    }

    async fn model_info_exists(&self, purl: &str) -> Result<bool> {
        Ok(self.model_infos.contains_key(purl))
    }

    async fn model_info_keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.model_infos.iter().map(|e| e.key().clone()).collect();
        keys.sort_unstable();
        Ok(keys)
    }
}
