//! Allocation report JSON.

use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

use crate::domain::{AllocationPlan, Excerpt, ExcerptOptions, ProcessedFile};
use crate::utils::stable_file_id;

pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Write the JSON report consumed by the document renderer: totals for
/// pagination, the per-directory allocation plans (ratio mode only), and
/// per-file cleaning stats keyed by stable ids.
pub fn write_report(
    report_path: &Path,
    options: &ExcerptOptions,
    excerpt: &Excerpt,
    plans: &[AllocationPlan],
    files: &[&ProcessedFile],
    include_timestamp: bool,
) -> Result<()> {
    let mut sorted_files: Vec<&&ProcessedFile> = files.iter().collect();
    sorted_files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    let file_manifest: Vec<Value> = sorted_files
        .iter()
        .map(|f| {
            json!({
                "id": stable_file_id(&f.relative_path),
                "path": f.relative_path,
                "lines": f.line_count(),
                "stats": f.stats,
            })
        })
        .collect();

    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    report.insert("options".to_string(), serde_json::to_value(options)?);
    report.insert(
        "totals".to_string(),
        json!({
            "lines": excerpt.line_count(),
            "pages": excerpt.total_pages,
            "truncated": excerpt.truncated,
        }),
    );
    if !plans.is_empty() {
        report.insert("directories".to_string(), serde_json::to_value(plans)?);
    }
    if !file_manifest.is_empty() {
        report.insert("files".to_string(), Value::Array(file_manifest));
    }

    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&Value::Object(report))?)?;
    Ok(())
}
