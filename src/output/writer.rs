//! JSON and CSV writers

use crate::error::{Error, Result};
use crate::fetch::Record;
use crate::types::JsonValue;
use chrono::Local;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Column headers for the tabular export
const CSV_HEADERS: [&str; 6] = [
    "Page Name",
    "Creation Time",
    "Link Title",
    "Link Description",
    "Ad Body",
    "Snapshot URL",
];

/// Separator used when joining list-valued fields into one CSV cell
pub const DEFAULT_LIST_SEPARATOR: &str = ", ";

// ============================================================================
// Export Config
// ============================================================================

/// Where and how result files are written
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory result files land in (created if missing)
    pub directory: PathBuf,
    /// Separator for multi-valued fields in the CSV
    pub list_separator: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("results"),
            list_separator: DEFAULT_LIST_SEPARATOR.to_string(),
        }
    }
}

impl ExportConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set the list separator
    #[must_use]
    pub fn with_list_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_separator = separator.into();
        self
    }
}

/// Paths produced by one export
#[derive(Debug, Clone)]
pub struct ExportPaths {
    /// Full-fidelity JSON file
    pub json: PathBuf,
    /// Flattened CSV file
    pub csv: PathBuf,
}

// ============================================================================
// Exporter
// ============================================================================

/// Writes one result set to a timestamped JSON/CSV file pair
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    /// Create an exporter
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Write both formats and return the paths written.
    ///
    /// Files are named `fb_ads_{country}_{keyword}_{timestamp}`; country
    /// and keyword are sanitized for the filesystem.
    pub fn export(&self, records: &[Record], country: &str, keyword: &str) -> Result<ExportPaths> {
        fs::create_dir_all(&self.config.directory).map_err(|e| {
            Error::output(format!(
                "failed to create {}: {e}",
                self.config.directory.display()
            ))
        })?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let base = format!(
            "fb_ads_{}_{}_{stamp}",
            sanitize(country),
            sanitize(keyword)
        );

        let json = self.config.directory.join(format!("{base}.json"));
        write_json(&json, records)?;

        let csv = self.config.directory.join(format!("{base}.csv"));
        write_csv(&csv, records, &self.config.list_separator)?;

        Ok(ExportPaths { json, csv })
    }
}

/// Write records as a pretty-printed JSON array
pub fn write_json(path: &Path, records: &[Record]) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)?;
    Ok(())
}

/// Write records as flattened CSV
pub fn write_csv(path: &Path, records: &[Record], separator: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADERS)?;

    for record in records {
        writer.write_record(&[
            text_field(record, "page_name"),
            text_field(record, "ad_creation_time"),
            joined_field(record, "ad_creative_link_titles", separator),
            joined_field(record, "ad_creative_link_descriptions", separator),
            joined_field(record, "ad_creative_bodies", separator),
            text_field(record, "ad_snapshot_url"),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

// ============================================================================
// Flattening helpers
// ============================================================================

/// A scalar field rendered as text; missing or non-scalar values become
/// the empty string.
pub fn text_field(record: &Record, key: &str) -> String {
    match record.get(key) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// A list-valued field joined into one string; a bare string passes
/// through, anything else becomes the empty string.
pub fn joined_field(record: &Record, key: &str, separator: &str) -> String {
    match record.get(key) {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(JsonValue::as_str)
            .collect::<Vec<_>>()
            .join(separator),
        Some(JsonValue::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Keep filenames portable: alphanumerics, dash and underscore survive,
/// everything else collapses to an underscore.
fn sanitize(part: &str) -> String {
    let cleaned: String = part
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}
