use super::{claims_name, read_text_capped, FormatHandler, HandlerOutcome};
use crate::fingerprint::hash::sha256_bytes;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

enum Syntax {
    Json,
    Yaml,
}

/// Structured text (JSON and YAML) canonicalized by parsing to a value
/// tree and re-serializing as compact JSON with recursively sorted keys.
/// Two documents that differ only in key order or whitespace share one
/// canonical hash. Files that fail to parse keep default fields only.
pub struct StructuredTextHandler {
    name: &'static str,
    filenames: &'static [&'static str],
    extensions: &'static [&'static str],
    syntax: Syntax,
}

impl StructuredTextHandler {
    pub fn json() -> Self {
        Self {
            name: "json",
            filenames: &[
                "tokenizer_config.json",
                "special_tokens_map.json",
                "tokenizer.json",
                "vocab.json",
                "modules.json",
            ],
            extensions: &[".json"],
            syntax: Syntax::Json,
        }
    }

    pub fn yaml() -> Self {
        Self {
            name: "yaml",
            filenames: &[],
            extensions: &[".yaml", ".yml"],
            syntax: Syntax::Yaml,
        }
    }

    fn parse(&self, text: &str) -> Option<serde_json::Value> {
        // serde_json maps are ordered by key, so re-serializing sorts the
        // whole tree recursively
        match self.syntax {
            Syntax::Json => serde_json::from_str(text).ok(),
            Syntax::Yaml => serde_yaml_ng::from_str(text).ok(),
        }
    }
}

#[async_trait]
impl FormatHandler for StructuredTextHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn claims(&self, relative_name: &str) -> bool {
        claims_name(relative_name, self.filenames, self.extensions)
    }

    fn requires_text(&self) -> bool {
        true
    }

    async fn handle(&self, path: &Path) -> Result<HandlerOutcome> {
        let Some(text) = read_text_capped(path)? else {
            return Ok(HandlerOutcome::Default);
        };
        let Some(value) = self.parse(&text) else {
            return Ok(HandlerOutcome::Default);
        };
        let canonical = serde_json::to_string(&value)?;
        Ok(HandlerOutcome::Canonical(sha256_bytes(canonical.as_bytes())))
    }
}
