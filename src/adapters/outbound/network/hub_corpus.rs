use crate::identity::Purl;
use crate::ports::outbound::{CorpusFile, FileCorpus};
use crate::shared::error::AibomError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::time::Duration;
use tempfile::TempDir;

/// Default hub endpoint; overridable per identifier through the
/// `repository_url` qualifier and globally through configuration.
pub const DEFAULT_HUB_BASE_URL: &str = "https://huggingface.co";

#[derive(Debug, Deserialize)]
struct HubModelInfo {
    #[serde(default)]
    siblings: Vec<HubSibling>,
}

#[derive(Debug, Deserialize)]
struct HubSibling {
    rfilename: String,
}

/// HuggingFaceHubCorpus adapter for reading model files from a hub
///
/// This adapter implements the FileCorpus port over the hub's HTTP API:
/// the model-info endpoint enumerates repository files and the resolve
/// endpoint serves their bytes. Each fetched file is streamed into its
/// own temporary directory so a scan holds at most one download at a
/// time; the handle's drop cleans it up.
///
/// # Async Support
/// Uses the async reqwest client; transient failures are retried with a
/// short backoff.
pub struct HuggingFaceHubCorpus {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl HuggingFaceHubCorpus {
    /// Creates a hub corpus against the given endpoint
    pub fn new(base_url: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("aibom/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 3,
        })
    }

    /// Validates a path segment before it is spliced into a URL
    fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
        // Security: Prevent URL injection attacks
        if component.contains('/') || component.contains('\\') {
            anyhow::bail!(
                "Security: {} contains path separators which are not allowed",
                component_type
            );
        }

        if component.contains("..") {
            anyhow::bail!(
                "Security: {} contains '..' which is not allowed",
                component_type
            );
        }

        if component.contains('#') || component.contains('?') || component.contains('@') {
            anyhow::bail!(
                "Security: {} contains URL-unsafe characters",
                component_type
            );
        }

        Ok(())
    }

    fn validate_purl(purl: &Purl) -> Result<()> {
        if let Some(namespace) = purl.namespace() {
            Self::validate_url_component(namespace, "Repository namespace")?;
        }
        Self::validate_url_component(purl.name(), "Repository name")?;
        if let Some(version) = purl.version() {
            Self::validate_url_component(version, "Revision")?;
        }
        Ok(())
    }

    /// Files fetched from the hub keep their repo-relative names; a name
    /// that climbs out of the staging directory is hostile.
    fn validate_relative_name(relative_name: &str) -> Result<()> {
        let escapes = relative_name.starts_with('/')
            || relative_name
                .split('/')
                .any(|segment| segment == ".." || segment.is_empty());
        if escapes {
            anyhow::bail!(
                "Security: hub file name {} would escape the staging directory",
                relative_name
            );
        }
        Ok(())
    }

    fn repo_base_url(&self, purl: &Purl) -> String {
        purl.qualifier("repository_url")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| self.base_url.clone())
    }

    fn encoded_repo_path(purl: &Purl) -> String {
        match purl.namespace() {
            Some(namespace) => format!(
                "{}/{}",
                urlencoding::encode(namespace),
                urlencoding::encode(purl.name())
            ),
            None => urlencoding::encode(purl.name()).into_owned(),
        }
    }

    fn model_info_url(&self, purl: &Purl) -> String {
        let base = self.repo_base_url(purl);
        let repo = Self::encoded_repo_path(purl);
        match purl.version() {
            Some(version) => format!(
                "{}/api/models/{}/revision/{}",
                base,
                repo,
                urlencoding::encode(version)
            ),
            None => format!("{}/api/models/{}", base, repo),
        }
    }

    fn resolve_url(&self, purl: &Purl, relative_name: &str) -> String {
        let base = self.repo_base_url(purl);
        let repo = Self::encoded_repo_path(purl);
        let revision = purl.version().unwrap_or("main");
        let encoded_name: Vec<String> = relative_name
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "{}/{}/resolve/{}/{}",
            base,
            repo,
            urlencoding::encode(revision),
            encoded_name.join("/")
        )
    }

    /// Issues a GET with retry and a short backoff between attempts
    async fn get_with_retry(&self, url: &str) -> Result<reqwest::Response> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.get_once(url).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap())
    }

    async fn get_once(&self, url: &str) -> Result<reqwest::Response> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("Hub returned status code {} for {}", response.status(), url);
        }
        Ok(response)
    }
}

#[async_trait]
impl FileCorpus for HuggingFaceHubCorpus {
    async fn list_files(&self, purl: &Purl) -> Result<Vec<String>> {
        Self::validate_purl(purl)?;
        let url = self.model_info_url(purl);
        let response = self.get_with_retry(&url).await.map_err(|e| {
            anyhow::Error::from(AibomError::CorpusUnavailable {
                purl: purl.to_string(),
                reason: e.to_string(),
            })
        })?;
        let info: HubModelInfo = response
            .json()
            .await
            .context("Hub model info was not valid JSON")?;

        let mut names: Vec<String> = info
            .siblings
            .into_iter()
            .map(|sibling| sibling.rfilename)
            .collect();
        names.sort_unstable();
        names.dedup();
        Ok(names)
    }

    async fn fetch_file(&self, purl: &Purl, relative_name: &str) -> Result<CorpusFile> {
        Self::validate_purl(purl)?;
        Self::validate_relative_name(relative_name)?;

        let staging = TempDir::new().context("Failed to create staging directory")?;
        let target = staging.path().join(relative_name);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to stage {}", relative_name))?;
        }

        let url = self.resolve_url(purl, relative_name);
        let mut response = self.get_with_retry(&url).await?;

        // stream to disk so multi-gigabyte weights never sit in memory
        let mut file = fs::File::create(&target)
            .with_context(|| format!("Failed to create staged file {}", target.display()))?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk)
                .with_context(|| format!("Failed to write staged file {}", target.display()))?;
        }
        file.flush()?;

        Ok(CorpusFile::staged(relative_name, target, staging))
    }
}
