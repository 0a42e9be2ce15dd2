/// Network adapters for external API calls
mod hub_corpus;

pub use hub_corpus::{HuggingFaceHubCorpus, DEFAULT_HUB_BASE_URL};
