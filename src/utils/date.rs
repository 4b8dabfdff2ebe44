//! Recording date extraction from file names.

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Extract the recording date embedded in a file identifier.
///
/// Recognised forms, searched left to right on the file name (directories
/// are ignored):
///
/// - a run of exactly eight digits, read as `YYYYMMDD`
///   (`bird12_20200501_073000.wav`)
/// - `YYYY-MM-DD` or `YYYY_MM_DD` (`bird12_2020-05-01.wav`)
///
/// The first candidate that forms a valid calendar date wins.
pub fn date_from_file_id(file_id: &str) -> Option<NaiveDate> {
    let name = file_id.rsplit(['/', '\\']).next().unwrap_or(file_id);
    let bytes = name.as_bytes();

    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let run_end = bytes[i..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |offset| i + offset);

        if run_end - i == 8
            && let Ok(date) = NaiveDate::parse_from_str(&name[i..run_end], "%Y%m%d")
        {
            return Some(date);
        }

        if run_end - i == 4
            && let Some(date) = separated_date(&name[i..])
        {
            return Some(date);
        }

        i = run_end;
    }

    None
}

/// Parse `YYYY-MM-DD` / `YYYY_MM_DD` at the start of `s`.
fn separated_date(s: &str) -> Option<NaiveDate> {
    let candidate = s.get(..10)?;
    let sep = candidate.as_bytes()[4];
    if (sep != b'-' && sep != b'_') || candidate.as_bytes()[7] != sep {
        return None;
    }
    let normalized = candidate.replace('_', "-");
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").ok()
}

/// Like [`date_from_file_id`], but a missing date is an error.
pub fn file_date(file_id: &str) -> Result<NaiveDate> {
    date_from_file_id(file_id).ok_or_else(|| Error::FileDateMissing {
        file_id: file_id.to_string(),
    })
}

/// Parse a user-supplied `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}
