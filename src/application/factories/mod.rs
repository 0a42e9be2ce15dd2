mod output_factory;

pub use output_factory::{OutputFactory, OutputTarget};
