use super::{claims_name, read_text_capped, FormatHandler, HandlerOutcome};
use crate::fingerprint::hash::sha256_bytes;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Line-oriented text formats whose meaning does not depend on line
/// order: vocabularies, merge tables, CSV exports. The canonical form
/// drops blank and `#` comment lines, sorts what remains, and joins with
/// single newlines; its hash is the ordered hash.
pub struct LineTextHandler {
    name: &'static str,
    filenames: &'static [&'static str],
    extensions: &'static [&'static str],
}

impl LineTextHandler {
    pub fn csv() -> Self {
        Self {
            name: "csv",
            filenames: &[],
            extensions: &[".csv"],
        }
    }

    pub fn plain_text() -> Self {
        Self {
            name: "txt",
            filenames: &["merges.txt", "vocab.txt", "unigrams.txt"],
            extensions: &[".txt"],
        }
    }
}

/// Canonical text for a set of lines, independent of their order in the
/// file. Blank lines carry no content and comment lines carry no data,
/// so both are dropped before sorting.
pub fn canonicalize_lines(text: &str) -> String {
    let mut lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .collect();
    lines.sort_unstable();
    lines.join("\n")
}

#[async_trait]
impl FormatHandler for LineTextHandler {
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
        let canonical = canonicalize_lines(&text);
        Ok(HandlerOutcome::Canonical(sha256_bytes(canonical.as_bytes())))
    }
}
