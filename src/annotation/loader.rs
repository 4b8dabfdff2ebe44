//! Annotation store loading.
//!
//! Two layouts are supported:
//!
//! - JSON: an object keyed by file id, each value holding the four aligned
//!   arrays `labels`, `abs_start_times`, `start_times`, `end_times`. Files
//!   are sequenced by key order.
//! - CSV: one row per segment with columns `file,label,abs_start,start,end`.
//!   Files are sequenced by first appearance.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsStr;
use std::path::Path;

use serde::Deserialize;

use super::{AnnotationStore, Segment, SegmentRecord};
use crate::error::{Error, Result};

/// Internal record for CSV deserialization.
#[derive(Debug, Deserialize)]
struct SegmentRow {
    file: String,
    label: i64,
    abs_start: f64,
    start: f64,
    end: f64,
}

/// Load an annotation store, choosing the parser by file extension.
///
/// # Errors
///
/// Returns [`Error::AnnotationNotFound`] if the path does not exist,
/// [`Error::UnsupportedAnnotationFormat`] for unknown extensions, and
/// [`Error::AnnotationParse`] if the contents cannot be parsed.
pub fn load_annotations(path: &Path) -> Result<AnnotationStore> {
    if !path.exists() {
        return Err(Error::AnnotationNotFound {
            path: path.to_path_buf(),
        });
    }

    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case(OsStr::new("json")) => load_json_annotations(path),
        Some(ext) if ext.eq_ignore_ascii_case(OsStr::new("csv")) => load_csv_annotations(path),
        _ => Err(Error::UnsupportedAnnotationFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a JSON annotation store.
pub fn load_json_annotations(path: &Path) -> Result<AnnotationStore> {
    let contents = std::fs::read_to_string(path)?;
    let files: BTreeMap<String, SegmentRecord> =
        serde_json::from_str(&contents).map_err(|e| Error::AnnotationParse {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    Ok(files.into_iter().collect())
}

/// Load a CSV annotation store.
///
/// Handles a UTF-8 BOM and surrounding whitespace in fields.
pub fn load_csv_annotations(path: &Path) -> Result<AnnotationStore> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::AnnotationParse {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut store = AnnotationStore::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (line_num, result) in reader.deserialize::<SegmentRow>().enumerate() {
        let row = result.map_err(|e| Error::AnnotationParse {
            path: path.to_path_buf(),
            source: format!("line {}: {e}", line_num + 2).into(),
        })?;

        let position = *positions.entry(row.file.clone()).or_insert_with(|| {
            store.push(row.file.clone(), SegmentRecord::default());
            store.len() - 1
        });

        store.files[position].record.push(Segment {
            label: row.label,
            abs_start_time: row.abs_start,
            start_time: row.start,
            end_time: row.end,
        });
    }

    Ok(store)
}
