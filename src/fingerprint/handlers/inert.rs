use super::{claims_name, FormatHandler, HandlerOutcome};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Formats that are recognized but carry neither an order-insensitive
/// text form nor embedded code: msgpack weights, sentencepiece models,
/// HDF5 checkpoints. Claiming them stops later handlers from
/// misinterpreting the content; the record keeps default fields.
pub struct InertHandler {
    name: &'static str,
    filenames: &'static [&'static str],
    extensions: &'static [&'static str],
}

impl InertHandler {
    pub fn msgpack() -> Self {
        Self {
            name: "msgpack",
            filenames: &["flax_model.msgpack"],
            extensions: &[".msgpack"],
        }
    }

    pub fn sentencepiece() -> Self {
        Self {
            name: "sentencepiece",
            filenames: &["source.spm", "target.spm"],
            extensions: &[".spm"],
        }
    }

    pub fn tensorflow() -> Self {
        Self {
            name: "tensorflow",
            filenames: &["tf_model.h5"],
            extensions: &[".h5"],
        }
    }
}

#[async_trait]
impl FormatHandler for InertHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn claims(&self, relative_name: &str) -> bool {
        claims_name(relative_name, self.filenames, self.extensions)
    }

    async fn handle(&self, _path: &Path) -> Result<HandlerOutcome> {
        Ok(HandlerOutcome::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inert_outcome_is_default() {
        let handler = InertHandler::msgpack();
        let outcome = handler.handle(Path::new("flax_model.msgpack")).await.unwrap();
        assert_eq!(outcome, HandlerOutcome::Default);
    }

    #[test]
    fn test_claims() {
        assert!(InertHandler::msgpack().claims("flax_model.msgpack"));
        assert!(InertHandler::sentencepiece().claims("source.spm"));
        assert!(InertHandler::sentencepiece().claims("tokenizer/custom.spm"));
        assert!(InertHandler::tensorflow().claims("tf_model.h5"));
        assert!(!InertHandler::tensorflow().claims("tf_model.keras"));
    }
}
