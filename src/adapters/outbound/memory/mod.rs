/// In-memory adapters backed by concurrent maps.
pub mod catalog;

pub use catalog::InMemoryCatalog;
