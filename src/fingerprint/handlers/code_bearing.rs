use super::{claims_name, FormatHandler, HandlerOutcome};
use crate::ports::outbound::{ArtifactScanner, SymbolRef};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Serialized artifacts that can embed executable code references:
/// pickle files and the pickle-bearing pytorch and numpy containers.
/// The deserialization scanner reports `(module, symbol)` pairs; tensor
/// storage markers are bookkeeping, not code, and are dropped.
pub struct CodeBearingHandler {
    name: &'static str,
    filenames: &'static [&'static str],
    extensions: &'static [&'static str],
    scanner: Arc<dyn ArtifactScanner>,
}

impl CodeBearingHandler {
    pub fn pickle(scanner: Arc<dyn ArtifactScanner>) -> Self {
        Self {
            name: "pickle",
            filenames: &["model.pkl"],
            extensions: &[".pkl", ".pickle", ".joblib", ".dat", ".data"],
            scanner,
        }
    }

    pub fn pytorch(scanner: Arc<dyn ArtifactScanner>) -> Self {
        Self {
            name: "pytorch",
            filenames: &[
                "pytorch_model.bin",
                "training_args.bin",
                "scheduler.pt",
                "optimizer.pt",
            ],
            extensions: &[".bin", ".pt", ".pth", ".ckpt"],
            scanner,
        }
    }

    pub fn numpy(scanner: Arc<dyn ArtifactScanner>) -> Self {
        Self {
            name: "numpy",
            filenames: &["feats_stats.npz"],
            extensions: &[".npz", ".npy"],
            scanner,
        }
    }
}

fn is_storage_marker(symbol: &SymbolRef) -> bool {
    symbol.module.eq_ignore_ascii_case("torch") && symbol.symbol.contains("Storage")
}

#[async_trait]
impl FormatHandler for CodeBearingHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn claims(&self, relative_name: &str) -> bool {
        claims_name(relative_name, self.filenames, self.extensions)
    }

    async fn handle(&self, path: &Path) -> Result<HandlerOutcome> {
        let symbols = self.scanner.scan(path).await?;
        let mut artifacts: Vec<String> = symbols
            .into_iter()
            .filter(|symbol| !is_storage_marker(symbol))
            .map(|symbol| symbol.to_string())
            .collect();
        artifacts.sort_unstable();
        artifacts.dedup();
        Ok(HandlerOutcome::Artifacts(artifacts))
    }
}
