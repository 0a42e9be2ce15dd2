mod cli;
mod config;

use aibom::adapters::outbound::console::StderrProgressReporter;
use aibom::adapters::outbound::filesystem::{JsonFileCatalog, LocalDirCorpus};
use aibom::adapters::outbound::network::HuggingFaceHubCorpus;
use aibom::adapters::outbound::process::{CommandScanner, DisabledScanner};
use aibom::analysis::{RiskCategory, TestStatus};
use aibom::application::dto::{OutputFormat, ScanRequest};
use aibom::application::factories::{OutputFactory, OutputTarget};
use aibom::application::read_models::SimilarModelsPage;
use aibom::application::use_cases::{
    BuildSbomUseCase, FindSimilarUseCase, RankPercentileUseCase, ResolveQueryUseCase, Resolved,
};
use aibom::fingerprint::HandlerRegistry;
use aibom::identity::Purl;
use aibom::ports::outbound::{ArtifactScanner, FileCorpus};
use aibom::shared::error::{AibomError, ExitCode};
use aibom::shared::Result;
use cli::{Args, Command};
use config::{discover_config, load_config_from_path, AppConfig};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(exit_code(&e).as_i32());
    }
}

/// Maps an error to the exit code contract: missing catalog entries and
/// bad user input are distinguishable from real failures. Context layers
/// added with anyhow do not hide the underlying variant.
fn exit_code(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<AibomError>() {
        Some(AibomError::NotFound { .. }) => ExitCode::NotFound,
        Some(AibomError::InvalidIdentifier { .. }) | Some(AibomError::InvalidScanPath { .. }) => {
            ExitCode::InvalidArguments
        }
        _ => ExitCode::ApplicationError,
    }
}

async fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Load configuration: explicit file, or discovery in the working directory
    let config_file = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(Path::new("."))?,
    };
    let config = AppConfig::from_file(config_file);

    // Open the persistent catalog (Dependency Injection root)
    let catalog = JsonFileCatalog::open(config.catalog_dir.clone())?;

    match args.command {
        Command::Scan {
            purl,
            path,
            rebuild,
            format,
            output,
        } => scan(&config, catalog, purl, path, rebuild, format, output).await,
        Command::Resolve { query } => resolve(catalog, &query).await,
        Command::Similar { query, page, items } => {
            similar(&config, catalog, &query, page, items).await
        }
        Command::Rank { query, category } => rank(&config, catalog, &query, category).await,
    }
}

/// Handles `aibom scan`: picks the corpus, builds or fetches the SBOM,
/// and renders it to the requested target.
async fn scan(
    config: &AppConfig,
    catalog: JsonFileCatalog,
    purl: Option<String>,
    path: Option<PathBuf>,
    rebuild: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let target = match output {
        Some(path) => OutputTarget::File(path),
        None => OutputTarget::Stdout,
    };

    match (purl, path) {
        // Local directory: an explicit purl keys the catalog entry, and a
        // generic one derived from the directory name stands in otherwise
        (purl, Some(dir)) => {
            let purl = match purl {
                Some(text) => Purl::parse(&text)?,
                None => local_dir_purl(&dir)?,
            };
            let corpus = LocalDirCorpus::new(dir)?;
            build_and_render(config, catalog, corpus, purl, rebuild, format, target).await
        }
        // Remote scan straight off the hub
        (Some(text), None) => {
            let purl = Purl::parse(&text)?;
            if purl.ecosystem() != "huggingface" {
                return Err(AibomError::CorpusUnavailable {
                    purl: purl.to_string(),
                    reason: format!("no remote corpus for ecosystem '{}'", purl.ecosystem()),
                }
                .into());
            }
            let corpus = HuggingFaceHubCorpus::new(&config.hub_base_url)?;
            build_and_render(config, catalog, corpus, purl, rebuild, format, target).await
        }
        // clap's source group rejects this before we get here
        (None, None) => Err(AibomError::Validation {
            message: "scan needs --purl or --path".to_string(),
        }
        .into()),
    }
}

/// Wires the build use case over whichever corpus the scan selected.
async fn build_and_render<C: FileCorpus>(
    config: &AppConfig,
    catalog: JsonFileCatalog,
    corpus: C,
    purl: Purl,
    rebuild: bool,
    format: OutputFormat,
    target: OutputTarget,
) -> Result<()> {
    let scanner: Arc<dyn ArtifactScanner> = match &config.scanner_command {
        Some(program) => Arc::new(CommandScanner::new(program)),
        None => Arc::new(DisabledScanner::new()),
    };
    let registry = HandlerRegistry::with_default_handlers(scanner);
    let progress_reporter = StderrProgressReporter::new();

    let use_case = BuildSbomUseCase::new(catalog, corpus, registry, progress_reporter);
    let sbom = use_case.execute(ScanRequest::new(purl, rebuild)).await?;

    let formatted = OutputFactory::formatter(format).format(&sbom)?;
    OutputFactory::presenter(target).present(&formatted)?;

    Ok(())
}

/// A local directory scanned without an explicit identifier is cataloged
/// under a generic purl named after the directory.
fn local_dir_purl(dir: &Path) -> Result<Purl> {
    let canonical = dir.canonicalize().map_err(|e| AibomError::InvalidScanPath {
        path: dir.to_path_buf(),
        reason: format!("Failed to canonicalize path: {}", e),
    })?;
    let name = canonical
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("local-model");
    Purl::new("generic", None, name)
}

/// Handles `aibom resolve`: the resolved identifier goes to stdout so it
/// can be piped, commentary stays on stderr.
async fn resolve(catalog: JsonFileCatalog, query: &str) -> Result<()> {
    let resolver = ResolveQueryUseCase::new(catalog.clone(), catalog.clone(), catalog);

    match resolver.execute(query).await? {
        Some(Resolved::Model(purl)) => {
            eprintln!("✅ Query resolves to a cataloged model");
            println!("{}", purl);
            Ok(())
        }
        Some(Resolved::File(hash)) => {
            eprintln!("✅ Query resolves to cataloged file content");
            println!("{}", hash);
            Ok(())
        }
        None => Err(AibomError::NotFound {
            query: query.to_string(),
        }
        .into()),
    }
}

/// Handles `aibom similar`.
async fn similar(
    config: &AppConfig,
    catalog: JsonFileCatalog,
    query: &str,
    page: usize,
    items: usize,
) -> Result<()> {
    let target = target_purl(&catalog, query).await?;
    let ranker = RankPercentileUseCase::new(catalog.clone(), config.num_bins, config.cdf_ttl());
    let use_case = FindSimilarUseCase::new(catalog.clone(), catalog, ranker);

    let result = use_case.execute(&target, page, items).await?;
    print_similar_page(&target, &result);

    Ok(())
}

/// Handles `aibom rank`: the bare percentile goes to stdout.
async fn rank(
    config: &AppConfig,
    catalog: JsonFileCatalog,
    query: &str,
    category: RiskCategory,
) -> Result<()> {
    let purl = target_purl(&catalog, query).await?;
    let ranker = RankPercentileUseCase::new(catalog.clone(), config.num_bins, config.cdf_ttl());

    match ranker.rank_model(&purl.to_string(), category).await? {
        Some(value) => {
            eprintln!("✅ {} percentile for {}", category, purl);
            println!("{:.1}", value);
            Ok(())
        }
        None => Err(AibomError::NotFound {
            query: purl.to_string(),
        }
        .into()),
    }
}

/// Turns a similarity/ranking query into a target purl.
///
/// A fully versioned purl is taken at face value; whether it exists is
/// the command's own catalog lookup to decide, so models scanned without
/// analysis data stay reachable. Everything else goes through the
/// resolver, which completes versions and repository names but only ever
/// lands on analyzed models.
async fn target_purl(catalog: &JsonFileCatalog, query: &str) -> Result<Purl> {
    if let Ok(purl) = Purl::parse(query) {
        if purl.is_versioned() {
            return Ok(purl);
        }
    }

    let resolver = ResolveQueryUseCase::new(catalog.clone(), catalog.clone(), catalog.clone());
    match resolver.execute(query).await? {
        Some(Resolved::Model(purl)) => {
            eprintln!("✅ Resolved query to {}", purl);
            Ok(purl)
        }
        Some(Resolved::File(_)) => {
            eprintln!("⚠️  Query matches cataloged file content; this command needs a model");
            Err(AibomError::NotFound {
                query: query.to_string(),
            }
            .into())
        }
        None => Err(AibomError::NotFound {
            query: query.to_string(),
        }
        .into()),
    }
}

fn print_similar_page(target: &Purl, result: &SimilarModelsPage) {
    if result.total_matches == 0 {
        println!("No cataloged models share file content with {}", target);
        return;
    }

    println!(
        "{} cataloged model(s) share file content with {} (page {})",
        result.total_matches, target, result.page
    );
    if result.entries.is_empty() {
        println!("(no results on this page)");
    }

    for entry in &result.entries {
        println!();
        match &entry.name {
            Some(name) => println!("  {} ({})", entry.purl, name),
            None => println!("  {}", entry.purl),
        }
        println!(
            "    {} shared file(s), {:.1}% of the target's content",
            entry.shared_hash_count,
            entry.overlap_ratio * 100.0
        );
        if entry.assessments.is_empty() {
            println!("    {}", "no analysis data".dimmed());
        } else {
            let columns: Vec<String> = entry
                .assessments
                .iter()
                .map(|a| format!("{}: {} {:>5.1}", a.category, status_label(a.status), a.rank))
                .collect();
            println!("    {}", columns.join("  "));
        }
    }
}

/// Pads before coloring so the escape codes stay out of the width math.
fn status_label(status: TestStatus) -> String {
    let padded = format!("{:<10}", status.to_string());
    match status {
        TestStatus::Pass => padded.green().to_string(),
        TestStatus::Warning => padded.yellow().to_string(),
        TestStatus::Severe => padded.red().to_string(),
        TestStatus::NotTested => padded.dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_not_found() {
        let error = anyhow::Error::from(AibomError::NotFound {
            query: "x".to_string(),
        });
        assert_eq!(exit_code(&error), ExitCode::NotFound);
    }

    #[test]
    fn test_exit_code_survives_context() {
        let error = anyhow::Error::from(AibomError::NotFound {
            query: "x".to_string(),
        })
        .context("while resolving");
        assert_eq!(exit_code(&error), ExitCode::NotFound);
    }

    #[test]
    fn test_exit_code_invalid_identifier() {
        let error = anyhow::Error::from(AibomError::InvalidIdentifier {
            input: "pkg:".to_string(),
            reason: "truncated".to_string(),
        });
        assert_eq!(exit_code(&error), ExitCode::InvalidArguments);
    }

    #[test]
    fn test_exit_code_other_errors_are_application_errors() {
        let error = anyhow::anyhow!("catalog directory vanished");
        assert_eq!(exit_code(&error), ExitCode::ApplicationError);
    }

    #[test]
    fn test_local_dir_purl_uses_directory_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bert-finetuned");
        std::fs::create_dir(&path).unwrap();

        let purl = local_dir_purl(&path).unwrap();

        assert_eq!(purl.ecosystem(), "generic");
        assert_eq!(purl.name(), "bert-finetuned");
        assert!(purl.version().is_none());
    }

    #[test]
    fn test_local_dir_purl_missing_directory() {
        let error = local_dir_purl(Path::new("/nonexistent/model-dir")).unwrap_err();
        assert!(error.to_string().contains("Invalid scan path"));
    }

    #[test]
    fn test_status_label_keeps_padding() {
        // the visible part always spans at least the column width
        for status in [
            TestStatus::Pass,
            TestStatus::Warning,
            TestStatus::Severe,
            TestStatus::NotTested,
        ] {
            let label = status_label(status);
            assert!(label.contains(&format!("{:<10}", status.to_string())));
        }
    }
}
