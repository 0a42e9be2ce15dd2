/// Identity domain: canonical identifiers, query classification, and
/// repository version indexes.
pub mod purl;
pub mod query;
pub mod repo;

pub use purl::Purl;
pub use query::{classify, QueryForm, ECOSYSTEM_PRIORITY};
pub use repo::RepoRecord;
