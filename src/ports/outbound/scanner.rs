use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// A code reference embedded in a serialized artifact: the importable
/// module and the symbol the deserializer would resolve in it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolRef {
    pub module: String,
    pub symbol: String,
}

impl SymbolRef {
    pub fn new(module: &str, symbol: &str) -> Self {
        Self {
            module: module.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

impl std::fmt::Display for SymbolRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.module, self.symbol)
    }
}

/// ArtifactScanner port for the external deserialization scanner
///
/// The scanner inspects pickle-bearing artifacts (pickle, pytorch, numpy
/// containers) and reports which code symbols deserialization would pull
/// in. It is a black box to this crate: only the path goes in and the
/// symbol pairs come out.
///
/// # Async Support
/// Scanning shells out or crosses a service boundary and can be slow on
/// large files; implementations must be `Send + Sync`.
#[async_trait]
pub trait ArtifactScanner: Send + Sync {
    /// Scans one artifact
    ///
    /// # Returns
    /// The symbol references found; an empty list is a valid, clean result
    ///
    /// # Errors
    /// Returns an error if the scanner fails or times out on this file.
    /// Callers record that against the file and keep the rest of the scan.
    async fn scan(&self, path: &Path) -> Result<Vec<SymbolRef>>;
}
