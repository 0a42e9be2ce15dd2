use crate::ports::outbound::{ArtifactScanner, SymbolRef};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// DisabledScanner adapter used when no scanner command is configured
///
/// Code-bearing artifacts still get their default fingerprint fields;
/// this scanner just reports no embedded symbols, so the `artifacts`
/// list stays empty rather than the whole scan failing.
#[derive(Debug, Default)]
pub struct DisabledScanner;

impl DisabledScanner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArtifactScanner for DisabledScanner {
    async fn scan(&self, _path: &Path) -> Result<Vec<SymbolRef>> {
        Ok(Vec::new())
    }
}
