/// Fingerprint domain: content hashing, per-format canonicalization, and
/// the SBOM document those fingerprints roll up into.
pub mod handlers;
pub mod hash;
pub mod record;

pub use handlers::{FormatHandler, HandlerOutcome, HandlerRegistry};
pub use hash::EMPTY_SHA256;
pub use record::{ComponentSbom, FileRecord};
