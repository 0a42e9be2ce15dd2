use crate::application::dto::ScanRequest;
use crate::fingerprint::{ComponentSbom, FileRecord, HandlerRegistry};
use crate::ports::outbound::{FileCorpus, ProgressReporter, SbomCatalog};
use crate::shared::Result;

/// BuildSbomUseCase - Core use case for fingerprinting a model
///
/// Implements get-or-build: a cataloged SBOM is returned as-is unless a
/// rebuild is requested; otherwise the corpus is listed, each file is
/// materialized one at a time, fingerprinted through the format handler
/// registry, and the finished document replaces the previous one in a
/// single catalog write.
///
/// # Type Parameters
/// * `SC` - SbomCatalog implementation
/// * `C` - FileCorpus implementation
/// * `PR` - ProgressReporter implementation
pub struct BuildSbomUseCase<SC, C, PR> {
    sbom_catalog: SC,
    corpus: C,
    registry: HandlerRegistry,
    progress_reporter: PR,
}

impl<SC, C, PR> BuildSbomUseCase<SC, C, PR>
where
    SC: SbomCatalog,
    C: FileCorpus,
    PR: ProgressReporter,
{
    /// Creates a new BuildSbomUseCase with injected dependencies
    pub fn new(sbom_catalog: SC, corpus: C, registry: HandlerRegistry, progress_reporter: PR) -> Self {
        Self {
            sbom_catalog,
            corpus,
            registry,
            progress_reporter,
        }
    }

    /// Executes the SBOM build use case
    ///
    /// # Arguments
    /// * `request` - The scan request with the versioned identifier and rebuild flag
    ///
    /// # Returns
    /// The SBOM, either freshly built or straight from the catalog
    pub async fn execute(&self, request: ScanRequest) -> Result<ComponentSbom> {
        let purl = request.purl.to_string();

        // Step 1: Serve the cataloged document unless a rebuild was asked for
        if !request.rebuild {
            if let Some(existing) = self.sbom_catalog.get_sbom(&purl).await? {
                self.progress_reporter.report(&format!(
                    "✅ Using cataloged SBOM for {} ({} file(s))",
                    purl,
                    existing.files.len()
                ));
                return Ok(existing);
            }
        }

        // Step 2: Enumerate the corpus
        let names = self.list_and_report_files(&request).await?;

        // Step 3: Fingerprint one file at a time
        let records = self.fingerprint_files(&request, &names).await;

        // Step 4: Replace the catalog document in one write
        let sbom = ComponentSbom::new(&purl, records);
        self.sbom_catalog.put_sbom(&sbom).await?;

        self.progress_reporter.report_completion(&format!(
            "✅ SBOM complete: {} file(s) recorded for {}",
            sbom.files.len(),
            purl
        ));

        Ok(sbom)
    }

    /// Lists the corpus files, reporting progress
    async fn list_and_report_files(&self, request: &ScanRequest) -> Result<Vec<String>> {
        self.progress_reporter.report(&format!(
            "📖 Listing repository files for: {}",
            request.purl
        ));

        let names = self.corpus.list_files(&request.purl).await?;

        self.progress_reporter
            .report(&format!("✅ Detected {} file(s)", names.len()));

        Ok(names)
    }

    /// Fetches and fingerprints each file; per-file failures become
    /// unreadable records rather than aborting the scan
    async fn fingerprint_files(&self, request: &ScanRequest, names: &[String]) -> Vec<FileRecord> {
        let total = names.len();
        let mut records = Vec::with_capacity(total);

        for (index, name) in names.iter().enumerate() {
            let relative_name = normalize_relative_name(name);
            self.progress_reporter
                .report_progress(index + 1, total, Some(relative_name));

            let record = match self.corpus.fetch_file(&request.purl, name).await {
                Ok(file) => {
                    self.registry
                        .fingerprint(normalize_relative_name(file.relative_name()), file.path())
                        .await
                }
                Err(e) => {
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: could not read {}: {:#}",
                        relative_name, e
                    ));
                    FileRecord::unreadable(relative_name, &format!("{e:#}"))
                }
            };
            records.push(record);
        }

        records
    }
}

/// Strips leading separators and any `./` prefix so records carry clean
/// corpus-relative names whichever corpus produced them.
fn normalize_relative_name(name: &str) -> &str {
    let mut name = name;
    loop {
        let trimmed = name.trim_start_matches('/');
        let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
        if trimmed == name {
            return name;
        }
        name = trimmed;
    }
}
