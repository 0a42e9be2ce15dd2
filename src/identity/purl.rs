use crate::shared::error::AibomError;
use crate::shared::Result;
use std::collections::BTreeMap;

/// Maximum length for a package URL (security limit)
const MAX_PURL_LENGTH: usize = 1024;

/// Reserved prefix that marks a string as a package URL.
pub const PURL_SCHEME: &str = "pkg:";

/// Canonical identifier for a model repository or artifact,
/// in Package URL form: `pkg:ecosystem/[namespace/]name[@version][?qualifiers]`.
///
/// Invariants maintained by construction:
/// - ecosystem is lowercase and non-empty
/// - name is non-empty and percent-decoded
/// - qualifier keys are lowercase; qualifiers with empty values are dropped
/// - equality is field-wise, so two purls that differ only in qualifier
///   order or percent-encoding compare equal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Purl {
    ecosystem: String,
    namespace: Option<String>,
    name: String,
    version: Option<String>,
    qualifiers: BTreeMap<String, String>,
}

impl Purl {
    pub fn new(ecosystem: &str, namespace: Option<&str>, name: &str) -> Result<Self> {
        if ecosystem.is_empty() {
            anyhow::bail!("Package URL ecosystem cannot be empty");
        }
        if !ecosystem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '+' || c == '.')
        {
            anyhow::bail!("Package URL ecosystem contains invalid characters: {ecosystem}");
        }
        if name.is_empty() {
            anyhow::bail!("Package URL name cannot be empty");
        }
        Ok(Self {
            ecosystem: ecosystem.to_ascii_lowercase(),
            namespace: namespace.filter(|s| !s.is_empty()).map(str::to_string),
            name: name.to_string(),
            version: None,
            qualifiers: BTreeMap::new(),
        })
    }

    /// Parses the canonical string form.
    ///
    /// # Errors
    /// Returns `AibomError::InvalidIdentifier` when the input is not a
    /// well-formed package URL. Callers that classify free-form queries
    /// treat that as "does not resolve", not as a fatal error.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| -> anyhow::Error {
            AibomError::InvalidIdentifier {
                input: input.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if input.len() > MAX_PURL_LENGTH {
            return Err(invalid("identifier is too long"));
        }
        let rest = input
            .strip_prefix(PURL_SCHEME)
            .ok_or_else(|| invalid("missing pkg: scheme"))?;

        // qualifiers come after the first '?', the version after the last '@'
        let (rest, qualifier_part) = match rest.split_once('?') {
            Some((head, tail)) => (head, Some(tail)),
            None => (rest, None),
        };
        let (path, version) = match rest.rsplit_once('@') {
            Some((head, tail)) => (head, Some(tail)),
            None => (rest, None),
        };

        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 2 {
            return Err(invalid("expected pkg:ecosystem/name"));
        }
        let ecosystem = segments.remove(0);
        let name = decode_segment(segments.pop().unwrap_or_default())
            .ok_or_else(|| invalid("name has invalid percent-encoding"))?;
        let namespace = if segments.is_empty() {
            None
        } else {
            let decoded: Option<Vec<String>> = segments.iter().map(|s| decode_segment(s)).collect();
            Some(
                decoded
                    .ok_or_else(|| invalid("namespace has invalid percent-encoding"))?
                    .join("/"),
            )
        };

        let mut purl = Purl::new(ecosystem, namespace.as_deref(), &name)
            .map_err(|e| invalid(&e.to_string()))?;

        if let Some(version) = version {
            if version.is_empty() {
                return Err(invalid("version marker '@' without a version"));
            }
            let version = decode_segment(version)
                .ok_or_else(|| invalid("version has invalid percent-encoding"))?;
            purl.version = Some(version);
        }

        if let Some(qualifier_part) = qualifier_part {
            for pair in qualifier_part.split('&').filter(|p| !p.is_empty()) {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| invalid("qualifier without '='"))?;
                if key.is_empty() {
                    return Err(invalid("qualifier with empty key"));
                }
                if value.is_empty() {
                    continue;
                }
                let value = decode_segment(value)
                    .ok_or_else(|| invalid("qualifier value has invalid percent-encoding"))?;
                purl.qualifiers.insert(key.to_ascii_lowercase(), value);
            }
        }

        Ok(purl)
    }

    pub fn ecosystem(&self) -> &str {
        &self.ecosystem
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn is_versioned(&self) -> bool {
        self.version.is_some()
    }

    pub fn qualifier(&self, key: &str) -> Option<&str> {
        self.qualifiers.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    /// Returns a copy with the version stripped: the base identifier that
    /// keys the repository catalog.
    pub fn base(&self) -> Purl {
        let mut base = self.clone();
        base.version = None;
        base
    }

    pub fn with_version(&self, version: &str) -> Purl {
        let mut purl = self.clone();
        purl.version = Some(version.to_string());
        purl
    }

    pub fn with_qualifier(mut self, key: &str, value: &str) -> Purl {
        if !value.is_empty() {
            self.qualifiers
                .insert(key.to_ascii_lowercase(), value.to_string());
        }
        self
    }

    /// Repository path on the hub, `namespace/name` or bare `name`.
    pub fn repo_path(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}/{}", namespace, self.name),
            None => self.name.clone(),
        }
    }
}

fn decode_segment(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(|cow| cow.into_owned())
}

fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

impl std::fmt::Display for Purl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", PURL_SCHEME, self.ecosystem)?;
        if let Some(namespace) = &self.namespace {
            for segment in namespace.split('/') {
                write!(f, "/{}", encode_segment(segment))?;
            }
        }
        write!(f, "/{}", encode_segment(&self.name))?;
        if let Some(version) = &self.version {
            write!(f, "@{}", encode_segment(version))?;
        }
        // BTreeMap iteration keeps qualifier output order canonical
        for (i, (key, value)) in self.qualifiers.iter().enumerate() {
            let separator = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", separator, key, encode_segment(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let purl = Purl::parse("pkg:huggingface/bert-base-uncased").unwrap();
        assert_eq!(purl.ecosystem(), "huggingface");
        assert_eq!(purl.namespace(), None);
        assert_eq!(purl.name(), "bert-base-uncased");
        assert_eq!(purl.version(), None);
    }

    #[test]
    fn test_parse_full() {
        let purl =
            Purl::parse("pkg:huggingface/google/flan-t5-base@main?repository_url=https%3A%2F%2Fhub.example.com")
                .unwrap();
        assert_eq!(purl.ecosystem(), "huggingface");
        assert_eq!(purl.namespace(), Some("google"));
        assert_eq!(purl.name(), "flan-t5-base");
        assert_eq!(purl.version(), Some("main"));
        assert_eq!(
            purl.qualifier("repository_url"),
            Some("https://hub.example.com")
        );
    }

    #[test]
    fn test_parse_rejects_missing_scheme() {
        assert!(Purl::parse("huggingface/org/name").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_name() {
        assert!(Purl::parse("pkg:huggingface").is_err());
        assert!(Purl::parse("pkg:").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_version() {
        assert!(Purl::parse("pkg:github/org/name@").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let text = "pkg:huggingface/google/flan-t5-base@abc123";
        let purl = Purl::parse(text).unwrap();
        assert_eq!(purl.to_string(), text);
        assert_eq!(Purl::parse(&purl.to_string()).unwrap(), purl);
    }

    #[test]
    fn test_qualifier_normalization() {
        let a = Purl::parse("pkg:huggingface/org/name?B=2&a=1").unwrap();
        let b = Purl::parse("pkg:huggingface/org/name?a=1&b=2").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "pkg:huggingface/org/name?a=1&b=2");
    }

    #[test]
    fn test_empty_qualifier_values_dropped() {
        let purl = Purl::parse("pkg:huggingface/org/name?note=&task=ner").unwrap();
        assert_eq!(purl.qualifier("note"), None);
        assert_eq!(purl.qualifier("task"), Some("ner"));
    }

    #[test]
    fn test_base_strips_version() {
        let purl = Purl::parse("pkg:huggingface/org/name@rev1").unwrap();
        let base = purl.base();
        assert_eq!(base.version(), None);
        assert_eq!(base.to_string(), "pkg:huggingface/org/name");
        // the original is untouched
        assert_eq!(purl.version(), Some("rev1"));
    }

    #[test]
    fn test_with_version() {
        let base = Purl::parse("pkg:huggingface/org/name").unwrap();
        let versioned = base.with_version("deadbeef");
        assert_eq!(versioned.to_string(), "pkg:huggingface/org/name@deadbeef");
    }

    #[test]
    fn test_ecosystem_lowercased() {
        let purl = Purl::parse("pkg:HuggingFace/org/name").unwrap();
        assert_eq!(purl.ecosystem(), "huggingface");
    }

    #[test]
    fn test_percent_decoding_in_segments() {
        let purl = Purl::parse("pkg:huggingface/my%20org/my%20model").unwrap();
        assert_eq!(purl.namespace(), Some("my org"));
        assert_eq!(purl.name(), "my model");
        // Display re-encodes
        assert_eq!(purl.to_string(), "pkg:huggingface/my%20org/my%20model");
    }

    #[test]
    fn test_repo_path() {
        let with_namespace = Purl::parse("pkg:huggingface/google/flan-t5-base").unwrap();
        assert_eq!(with_namespace.repo_path(), "google/flan-t5-base");

        let bare = Purl::parse("pkg:huggingface/gpt2").unwrap();
        assert_eq!(bare.repo_path(), "gpt2");
    }

    #[test]
    fn test_version_with_at_in_namespace_not_confused() {
        // the version split takes the last '@' after qualifiers are removed
        let purl = Purl::parse("pkg:github/org/name@v1?tag=x%40y").unwrap();
        assert_eq!(purl.version(), Some("v1"));
        assert_eq!(purl.qualifier("tag"), Some("x@y"));
    }
}
