//! # File I/O Module
//!
//! Reads building snapshots and writes snapshots and reports:
//! - **Atomic saves**: Write to .tmp, fsync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility on load
//!
//! ## File Format
//!
//! Snapshots and reports are plain JSON. A report is wrapped in a
//! [`ReportFile`] envelope carrying the schema version and the generation
//! time; the report body itself has no timestamp.
//!
//! ## Example
//!
//! ```rust,no_run
//! use riser_core::building::Building;
//! use riser_core::catalog::EngineConstants;
//! use riser_core::file_io::{load_building, save_report};
//! use riser_core::report::calculate;
//! use std::path::Path;
//!
//! let building = load_building(Path::new("block_a.json"))?;
//! let report = calculate(&building, &EngineConstants::default())?;
//! save_report(&report, Path::new("block_a.report.json"))?;
//! # Ok::<(), riser_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::building::{Building, SCHEMA_VERSION};
use crate::errors::{CalcError, CalcResult};
use crate::report::BuildingReport;

/// Envelope written around a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFile {
    /// Schema version of the report layout
    pub version: String,
    /// When the report file was written
    pub generated: DateTime<Utc>,
    pub report: BuildingReport,
}

impl ReportFile {
    /// Wrap a report with the current schema version and time.
    pub fn new(report: BuildingReport) -> Self {
        ReportFile {
            version: SCHEMA_VERSION.to_string(),
            generated: Utc::now(),
            report,
        }
    }
}

/// Save a building snapshot with atomic write semantics.
///
/// # Example
///
/// ```rust,no_run
/// use riser_core::building::Building;
/// use riser_core::file_io::save_building;
/// use std::path::Path;
///
/// let building = Building::new("Block A");
/// save_building(&building, Path::new("block_a.json"))?;
/// # Ok::<(), riser_core::errors::CalcError>(())
/// ```
pub fn save_building(building: &Building, path: &Path) -> CalcResult<()> {
    write_json_atomic(building, path)
}

/// Save a report inside a [`ReportFile`] envelope with atomic write semantics.
pub fn save_report(report: &BuildingReport, path: &Path) -> CalcResult<()> {
    write_json_atomic(&ReportFile::new(report.clone()), path)
}

/// Serialize `value` and write it atomically.
///
/// The save process:
/// 1. Serialize to pretty JSON
/// 2. Write to a temporary file next to the target (`<ext>.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "saved file");
    Ok(())
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    path.with_extension(extension)
}

/// Load a building snapshot from a file.
///
/// # Returns
///
/// * `Ok(Building)` - Successfully loaded snapshot
/// * `Err(CalcError::MissingField)` - No `meta.version` in the file
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
///
/// Structural validation is left to [`Building::validate`].
pub fn load_building(path: &Path) -> CalcResult<Building> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    // Version first: a newer layout may not parse as `Building` at all
    let raw: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;
    let version = raw
        .pointer("/meta/version")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| CalcError::missing_field("meta.version"))?;
    validate_version(version)?;

    let building: Building = serde_json::from_value(raw)
        .map_err(|e| CalcError::serialization(format!("Invalid building in {}: {}", path.display(), e)))?;

    tracing::debug!(
        path = %path.display(),
        sections = building.sections.len(),
        "loaded building"
    );
    Ok(building)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor is not readable
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}
