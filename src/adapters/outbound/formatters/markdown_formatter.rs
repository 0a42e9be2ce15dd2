use crate::fingerprint::{ComponentSbom, FileRecord};
use crate::ports::outbound::SbomFormatter;
use crate::shared::Result;

/// Markdown table header for the file inventory
const TABLE_HEADER: &str = "| File | Size (bytes) | SHA-256 | Canonical SHA-256 |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|------|--------------|---------|-------------------|\n";

/// Markdown table header for embedded code references
const ARTIFACT_TABLE_HEADER: &str = "| File | Code Reference |\n";

/// Markdown table separator line for the code reference table
const ARTIFACT_TABLE_SEPARATOR: &str = "|------|----------------|\n";

/// MarkdownFormatter adapter for a human-readable SBOM report
///
/// This adapter implements the SbomFormatter port for Markdown format:
/// the full file inventory, then embedded code references, then any
/// per-file scan errors.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, sbom: &ComponentSbom) {
        output.push_str("# Model Artifact Inventory\n\n");
        output.push_str(&format!(
            "**Identifier:** `{}`\n\n",
            Self::escape_markdown_table_cell(&sbom.purl)
        ));
        output.push_str(&format!(
            "**Created:** {}\n\n",
            sbom.created.format("%Y-%m-%dT%H:%M:%SZ")
        ));
    }

    fn render_files(&self, output: &mut String, files: &[FileRecord]) {
        output.push_str("## Files\n\n");

        if files.is_empty() {
            output.push_str("*No files recorded*\n\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);

        for record in files {
            let canonical = record.ordered_sha256.as_deref().unwrap_or("");
            output.push_str(&format!(
                "| {} | {} | `{}` | {} |\n",
                Self::escape_markdown_table_cell(&record.filename),
                record.size,
                record.sha256,
                if canonical.is_empty() {
                    String::new()
                } else {
                    format!("`{}`", canonical)
                },
            ));
        }
        output.push('\n');
    }

    fn render_artifacts(&self, output: &mut String, files: &[FileRecord]) {
        let carriers: Vec<&FileRecord> =
            files.iter().filter(|f| !f.artifacts.is_empty()).collect();
        if carriers.is_empty() {
            return;
        }

        output.push_str("## Embedded Code References\n\n");
        output.push_str(
            "Symbols that deserializing these artifacts would import and execute.\n\n",
        );
        output.push_str(ARTIFACT_TABLE_HEADER);
        output.push_str(ARTIFACT_TABLE_SEPARATOR);

        for record in carriers {
            for artifact in &record.artifacts {
                output.push_str(&format!(
                    "| {} | `{}` |\n",
                    Self::escape_markdown_table_cell(&record.filename),
                    Self::escape_markdown_table_cell(artifact),
                ));
            }
        }
        output.push('\n');
    }

    fn render_errors(&self, output: &mut String, files: &[FileRecord]) {
        let failed: Vec<&FileRecord> = files.iter().filter(|f| f.error.is_some()).collect();
        if failed.is_empty() {
            return;
        }

        output.push_str("## Scan Errors\n\n");
        for record in failed {
            output.push_str(&format!(
                "- `{}`: {}\n",
                Self::escape_markdown_table_cell(&record.filename),
                Self::escape_markdown_table_cell(record.error.as_deref().unwrap_or("")),
            ));
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for MarkdownFormatter {
    fn format(&self, sbom: &ComponentSbom) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, sbom);
        self.render_files(&mut output, &sbom.files);
        self.render_artifacts(&mut output, &sbom.files);
        self.render_errors(&mut output, &sbom.files);

        Ok(output)
    }
}
