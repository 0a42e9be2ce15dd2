use crate::identity::purl::{Purl, PURL_SCHEME};

/// Ecosystems tried, in order, when a bare repository name is resolved.
pub const ECOSYSTEM_PRIORITY: [&str; 2] = ["huggingface", "github"];

/// Legacy flat model names predate the `org/name` convention; these
/// prefixes identify them as hub repository names.
const LEGACY_NAME_PREFIXES: [&str; 14] = [
    "albert-",
    "bert-",
    "camembert-",
    "ctrl-",
    "distilbert-",
    "flaubert-",
    "distil",
    "gpt2-",
    "openai-",
    "roberta-",
    "t5-",
    "transfo-",
    "xlm-",
    "xlnet-",
];

/// Syntactic form of a free-text lookup query.
///
/// Classification is pure and total: every input maps to exactly one form,
/// checked in declaration order. Whether the classified value actually
/// resolves is decided later against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryForm {
    /// Already a package URL (possibly versioned).
    Purl(Purl),
    /// A hub URL rewritten to an unversioned package URL.
    HubUrl(Purl),
    /// A bare repository name to be tried against each known ecosystem.
    RepoName(String),
    /// 64 hex characters: a direct content-hash lookup (lowercased).
    ContentHash(String),
    /// Nothing recognizable; resolves to not-found.
    Unknown,
}

pub fn classify(query: &str) -> QueryForm {
    let query = query.trim();
    if query.starts_with(PURL_SCHEME) {
        return match Purl::parse(query) {
            Ok(purl) => QueryForm::Purl(purl),
            Err(_) => QueryForm::Unknown,
        };
    }
    if is_url(query) {
        return match url_to_purl(query) {
            Some(purl) => QueryForm::HubUrl(purl),
            None => QueryForm::Unknown,
        };
    }
    if is_repo_name(query) {
        return QueryForm::RepoName(query.to_string());
    }
    if is_content_hash(query) {
        return QueryForm::ContentHash(query.to_ascii_lowercase());
    }
    QueryForm::Unknown
}

fn is_url(query: &str) -> bool {
    query.starts_with("https://") || query.starts_with("http://")
}

/// `org/name` shape, or one of the legacy flat names.
pub fn is_repo_name(query: &str) -> bool {
    if LEGACY_NAME_PREFIXES
        .iter()
        .any(|prefix| query.starts_with(prefix))
    {
        return true;
    }
    let mut halves = query.split('/');
    match (halves.next(), halves.next(), halves.next()) {
        (Some(owner), Some(name), None) => {
            !owner.is_empty()
                && !name.is_empty()
                && owner.chars().all(is_name_char)
                && name.chars().all(is_name_char)
        }
        _ => false,
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'
}

/// sha256 digests arrive in either case; lookups are lowercase.
pub fn is_content_hash(query: &str) -> bool {
    query.len() == 64 && query.chars().all(|c| c.is_ascii_hexdigit())
}

/// Rewrites a hub URL into an unversioned package URL.
///
/// Recognized hosts: `huggingface.co` (and its `hf.co` alias) and
/// `github.com`. Path segments are percent-decoded; at most the leading
/// `namespace/name` pair is used, so deep links into a repository still
/// identify it. Unrecognized hosts yield `None`.
pub fn url_to_purl(url: &str) -> Option<Purl> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let (host, path) = match rest.split_once('/') {
        Some((host, path)) => (host, path),
        None => (rest, ""),
    };
    let host = host.split(':').next().unwrap_or_default().to_ascii_lowercase();
    let ecosystem = match host.as_str() {
        "huggingface.co" | "hf.co" => "huggingface",
        "github.com" => "github",
        _ => return None,
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let (namespace, name) = match segments.as_slice() {
        [] => return None,
        [name] => (None, *name),
        [namespace, name, ..] => (Some(*namespace), *name),
    };
    let name = urlencoding::decode(name).ok()?;
    let namespace = match namespace {
        Some(segment) => Some(urlencoding::decode(segment).ok()?.into_owned()),
        None => None,
    };
    Purl::new(ecosystem, namespace.as_deref(), &name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_purl() {
        let form = classify("pkg:huggingface/google/flan-t5-base@main");
        match form {
            QueryForm::Purl(purl) => {
                assert_eq!(purl.repo_path(), "google/flan-t5-base");
                assert_eq!(purl.version(), Some("main"));
            }
            other => panic!("expected purl form, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_malformed_purl_is_unknown() {
        assert_eq!(classify("pkg:"), QueryForm::Unknown);
        assert_eq!(classify("pkg:huggingface"), QueryForm::Unknown);
    }

    #[test]
    fn test_classify_hub_url() {
        let form = classify("https://huggingface.co/google/flan-t5-base");
        match form {
            QueryForm::HubUrl(purl) => {
                assert_eq!(purl.to_string(), "pkg:huggingface/google/flan-t5-base");
            }
            other => panic!("expected hub url form, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_short_hub_alias() {
        let form = classify("https://hf.co/gpt2");
        assert_eq!(
            form,
            QueryForm::HubUrl(Purl::parse("pkg:huggingface/gpt2").unwrap())
        );
    }

    #[test]
    fn test_classify_github_url() {
        let form = classify("https://github.com/org/repo");
        assert_eq!(
            form,
            QueryForm::HubUrl(Purl::parse("pkg:github/org/repo").unwrap())
        );
    }

    #[test]
    fn test_classify_unknown_host_is_unknown() {
        assert_eq!(classify("https://example.com/org/repo"), QueryForm::Unknown);
    }

    #[test]
    fn test_url_deep_link_keeps_repo_only() {
        let purl = url_to_purl("https://huggingface.co/google/flan-t5-base/tree/main").unwrap();
        assert_eq!(purl.to_string(), "pkg:huggingface/google/flan-t5-base");
    }

    #[test]
    fn test_url_trailing_slash() {
        let purl = url_to_purl("https://huggingface.co/google/flan-t5-base/").unwrap();
        assert_eq!(purl.repo_path(), "google/flan-t5-base");
    }

    #[test]
    fn test_url_percent_decoding() {
        let purl = url_to_purl("https://huggingface.co/my%20org/model").unwrap();
        assert_eq!(purl.namespace(), Some("my org"));
    }

    #[test]
    fn test_url_host_only_is_none() {
        assert!(url_to_purl("https://huggingface.co").is_none());
        assert!(url_to_purl("https://huggingface.co/").is_none());
    }

    #[test]
    fn test_classify_repo_name() {
        assert_eq!(
            classify("google/flan-t5-base"),
            QueryForm::RepoName("google/flan-t5-base".to_string())
        );
    }

    #[test]
    fn test_classify_legacy_flat_name() {
        assert_eq!(
            classify("bert-base-uncased"),
            QueryForm::RepoName("bert-base-uncased".to_string())
        );
        assert_eq!(
            classify("distilgpt2"),
            QueryForm::RepoName("distilgpt2".to_string())
        );
    }

    #[test]
    fn test_classify_content_hash() {
        let hash = "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855";
        assert_eq!(
            classify(hash),
            QueryForm::ContentHash(hash.to_ascii_lowercase())
        );
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify(""), QueryForm::Unknown);
        assert_eq!(classify("just words"), QueryForm::Unknown);
        assert_eq!(classify("a/b/c"), QueryForm::Unknown);
    }

    #[test]
    fn test_is_repo_name_rejects_empty_halves() {
        assert!(!is_repo_name("/name"));
        assert!(!is_repo_name("org/"));
        assert!(!is_repo_name("/"));
    }

    #[test]
    fn test_is_content_hash_requires_exact_length() {
        assert!(!is_content_hash("abc123"));
        assert!(!is_content_hash(&"a".repeat(63)));
        assert!(is_content_hash(&"a".repeat(64)));
        assert!(!is_content_hash(&"g".repeat(64)));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let queries = [
            "pkg:huggingface/gpt2",
            "https://huggingface.co/gpt2",
            "google/flan-t5-base",
            &"f".repeat(64),
            "???",
        ];
        for query in queries {
            assert_eq!(classify(query), classify(query));
        }
    }
}
