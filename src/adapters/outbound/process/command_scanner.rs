use crate::ports::outbound::{ArtifactScanner, SymbolRef};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(120);

/// What the scanner prints on stdout: a JSON array of imported symbols.
/// `name` is accepted as an alias so picklescan-style output works as-is.
#[derive(Debug, Deserialize)]
struct RawSymbol {
    module: String,
    #[serde(alias = "name")]
    symbol: String,
}

/// CommandScanner adapter that shells out to an external symbol scanner
///
/// This adapter implements the ArtifactScanner port by running a
/// configured command with the artifact path as its single argument and
/// reading the symbol list from stdout. The command is expected to exit
/// zero and print a JSON array of `{"module": ..., "symbol": ...}`
/// objects; anything else is reported as a scan error on the file it
/// was scanning.
pub struct CommandScanner {
    program: PathBuf,
    timeout: Duration,
}

impl CommandScanner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_SCAN_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ArtifactScanner for CommandScanner {
    async fn scan(&self, path: &Path) -> Result<Vec<SymbolRef>> {
        let command = tokio::process::Command::new(&self.program)
            .arg(path)
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, command)
            .await
            .map_err(|_| {
                anyhow::anyhow!(
                    "Scanner timed out after {}s on {}",
                    self.timeout.as_secs(),
                    path.display()
                )
            })?
            .with_context(|| format!("Failed to run scanner {}", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "Scanner exited with {} on {}: {}",
                output.status,
                path.display(),
                stderr.trim()
            );
        }

        let raw: Vec<RawSymbol> =
            serde_json::from_slice(&output.stdout).context("Scanner output was not valid JSON")?;
        Ok(raw
            .into_iter()
            .map(|s| SymbolRef::new(&s.module, &s.symbol))
            .collect())
    }
}
