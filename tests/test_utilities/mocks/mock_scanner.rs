use aibom::prelude::*;
use async_trait::async_trait;
use std::path::Path;

/// Mock ArtifactScanner for testing that returns a fixed symbol list
pub struct MockScanner {
    symbols: Vec<SymbolRef>,
}

impl MockScanner {
    /// A scanner that finds nothing; every artifact comes back clean
    pub fn clean() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    pub fn with_symbols(symbols: Vec<SymbolRef>) -> Self {
        Self { symbols }
    }
}

#[async_trait]
impl ArtifactScanner for MockScanner {
    async fn scan(&self, _path: &Path) -> Result<Vec<SymbolRef>> {
        Ok(self.symbols.clone())
    }
}
