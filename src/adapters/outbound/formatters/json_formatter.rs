use crate::fingerprint::{ComponentSbom, FileRecord};
use crate::ports::outbound::SbomFormatter;
use crate::shared::Result;
use chrono::SecondsFormat;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct Bom<'a> {
    #[serde(rename = "bomFormat")]
    bom_format: &'static str,
    #[serde(rename = "specVersion")]
    spec_version: &'static str,
    version: u32,
    #[serde(rename = "serialNumber")]
    serial_number: String,
    metadata: Metadata,
    component: Component<'a>,
    files: &'a [FileRecord],
}

#[derive(Debug, Serialize)]
struct Metadata {
    timestamp: String,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct Component<'a> {
    #[serde(rename = "type")]
    component_type: &'static str,
    purl: &'a str,
}

/// JsonFormatter adapter for generating the JSON SBOM document
///
/// This adapter implements the SbomFormatter port for JSON output. The
/// `files` section carries the catalog's fingerprint records verbatim;
/// the envelope adds document identity (serial number, creation time,
/// producing tool).
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for JsonFormatter {
    fn format(&self, sbom: &ComponentSbom) -> Result<String> {
        let bom = Bom {
            bom_format: "aibom",
            spec_version: "1.0",
            version: 1,
            serial_number: format!("urn:uuid:{}", Uuid::new_v4()),
            metadata: Metadata {
                timestamp: sbom.created.to_rfc3339_opts(SecondsFormat::Secs, true),
                tools: vec![Tool {
                    name: "aibom",
                    version: env!("CARGO_PKG_VERSION"),
                }],
            },
            component: Component {
                component_type: "machine-learning-model",
                purl: &sbom.purl,
            },
            files: &sbom.files,
        };

        serde_json::to_string_pretty(&bom).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sbom() -> ComponentSbom {
        let mut record = FileRecord::new("model.pkl", 2048, "ab".repeat(32));
        record.artifacts = vec!["collections.OrderedDict".to_string()];
        ComponentSbom::new(
            "pkg:huggingface/google/flan-t5-base@abc123",
            vec![record, FileRecord::new("config.json", 712, "cd".repeat(32))],
        )
    }

    #[test]
    fn test_format_envelope_fields() {
        let formatter = JsonFormatter::new();

        let json = formatter.format(&sample_sbom()).unwrap();

        assert!(json.contains("\"bomFormat\": \"aibom\""));
        assert!(json.contains("\"specVersion\": \"1.0\""));
        assert!(json.contains("\"serialNumber\": \"urn:uuid:"));
        assert!(json.contains("\"type\": \"machine-learning-model\""));
        assert!(json.contains("\"purl\": \"pkg:huggingface/google/flan-t5-base@abc123\""));
    }

    #[test]
    fn test_format_carries_file_records() {
        let formatter = JsonFormatter::new();

        let json = formatter.format(&sample_sbom()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let files = value["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["filename"], "model.pkl");
        assert_eq!(files[0]["sha256"], "ab".repeat(32));
        assert_eq!(files[0]["artifacts"][0], "collections.OrderedDict");
        // unset optional fields stay off the wire
        assert!(files[1].get("artifacts").is_none());
        assert!(files[1].get("error").is_none());
    }

    #[test]
    fn test_format_timestamp_is_rfc3339_utc() {
        let formatter = JsonFormatter::new();

        let json = formatter.format(&sample_sbom()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let timestamp = value["metadata"]["timestamp"].as_str().unwrap();
        assert!(timestamp.ends_with('Z'), "timestamp was {timestamp}");
        assert_eq!(value["metadata"]["tools"][0]["name"], "aibom");
    }
}
