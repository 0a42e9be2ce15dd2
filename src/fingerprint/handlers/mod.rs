/// Per-format content handlers and the registry that drives them.
///
/// Fingerprinting always computes the default fields (streaming content
/// hash and size). Exactly one specialized handler may then add to the
/// record: the first one, in declared order, whose filename claim and
/// text gate both pass. A failed gate moves on to the next handler, so a
/// binary file with a text extension simply keeps its default fields.
pub mod code_bearing;
pub mod inert;
pub mod line_text;
pub mod structured;

pub use code_bearing::CodeBearingHandler;
pub use inert::InertHandler;
pub use line_text::LineTextHandler;
pub use structured::StructuredTextHandler;

use crate::fingerprint::hash;
use crate::fingerprint::record::FileRecord;
use crate::ports::outbound::ArtifactScanner;
use crate::shared::security::{validate_file_size, MAX_CANONICALIZE_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// What a specialized handler contributed beyond the default fields.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutcome {
    /// Canonical hash of an order-insensitive representation.
    Canonical(String),
    /// Embedded code references reported by the scanner.
    Artifacts(Vec<String>),
    /// Nothing to add: the format is inert, or canonicalization declined.
    Default,
}

/// One file-format specialization.
#[async_trait]
pub trait FormatHandler: Send + Sync {
    /// Short format name for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this handler claims the file, by exact basename or by
    /// extension of the relative name.
    fn claims(&self, relative_name: &str) -> bool;

    /// Text-only handlers are gated behind the binary sniff.
    fn requires_text(&self) -> bool {
        false
    }

    /// Processes a claimed file.
    ///
    /// # Errors
    /// An error here means the file could not be processed at all (I/O,
    /// scanner failure); the registry records it on the file's entry and
    /// keeps the default fields. Recoverable canonicalization problems
    /// are not errors; they come back as [`HandlerOutcome::Default`].
    async fn handle(&self, path: &Path) -> Result<HandlerOutcome>;
}

/// Matches a relative name against exact basenames and extensions.
pub(crate) fn claims_name(
    relative_name: &str,
    filenames: &[&str],
    extensions: &[&str],
) -> bool {
    let basename = relative_name.rsplit('/').next().unwrap_or(relative_name);
    filenames.contains(&basename) || extensions.iter().any(|ext| relative_name.ends_with(ext))
}

/// Reads a whole file as UTF-8 for canonicalization.
///
/// `Ok(None)` means the content cannot be canonicalized (too large for a
/// whole-file read, or not valid UTF-8) and the caller should fall back
/// to default fields. `Err` means the file could not be read.
pub(crate) fn read_text_capped(path: &Path) -> Result<Option<String>> {
    let metadata = fs::metadata(path)?;
    if validate_file_size(metadata.len(), path, MAX_CANONICALIZE_SIZE).is_err() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    Ok(String::from_utf8(bytes).ok())
}

/// Ordered set of format handlers plus the default fingerprint step.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn FormatHandler>>,
}

impl HandlerRegistry {
    /// The standard handler set. Declaration order is the claim order.
    pub fn with_default_handlers(scanner: Arc<dyn ArtifactScanner>) -> Self {
        let handlers: Vec<Box<dyn FormatHandler>> = vec![
            Box::new(LineTextHandler::csv()),
            Box::new(StructuredTextHandler::json()),
            Box::new(InertHandler::msgpack()),
            Box::new(CodeBearingHandler::numpy(Arc::clone(&scanner))),
            Box::new(CodeBearingHandler::pickle(Arc::clone(&scanner))),
            Box::new(CodeBearingHandler::pytorch(scanner)),
            Box::new(InertHandler::sentencepiece()),
            Box::new(InertHandler::tensorflow()),
            Box::new(LineTextHandler::plain_text()),
            Box::new(StructuredTextHandler::yaml()),
        ];
        Self { handlers }
    }

    /// Registry with an explicit handler list, mainly for tests.
    pub fn new(handlers: Vec<Box<dyn FormatHandler>>) -> Self {
        Self { handlers }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Fingerprints one materialized file.
    ///
    /// Infallible by design: any failure lands in the record's `error`
    /// field (unreadable files get the sentinel hash) so one bad file
    /// never aborts a repository scan.
    pub async fn fingerprint(&self, relative_name: &str, path: &Path) -> FileRecord {
        let (sha256, size) = match hash::sha256_file(path) {
            Ok(pair) => pair,
            Err(e) => return FileRecord::unreadable(relative_name, &format!("{e:#}")),
        };
        let mut record = FileRecord::new(relative_name, size, sha256);

        for handler in &self.handlers {
            if !handler.claims(relative_name) {
                continue;
            }
            if handler.requires_text() {
                match hash::is_binary_file(path) {
                    Ok(false) => {}
                    // gate failed or unsniffable: the next handler may claim
                    Ok(true) | Err(_) => continue,
                }
            }
            match handler.handle(path).await {
                Ok(HandlerOutcome::Canonical(ordered)) => record.ordered_sha256 = Some(ordered),
                Ok(HandlerOutcome::Artifacts(artifacts)) => record.artifacts = artifacts,
                Ok(HandlerOutcome::Default) => {}
                Err(e) => record.error = Some(format!("{e:#}")),
            }
            break;
        }
        record
    }
}
