// gymstats - GPL-3.0-or-later
// This file is part of gymstats.
//
// gymstats is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// gymstats is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with gymstats.  If not, see <https://www.gnu.org/licenses/>.

//! Daily log file discovery.
//!
//! The collector writes one file per calendar day, named
//! `gym-stats-<YYYYMMDD>.csv`. That naming contract lives entirely in
//! [`log_filename`] and [`parse_log_filename_date`]; everything else treats
//! filenames as opaque.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Human-readable pattern used in "nothing matched" errors.
pub const LOG_FILE_PATTERN: &str = "gym-stats-*.csv";

const LOG_PREFIX: &str = "gym-stats-";
const LOG_SUFFIX: &str = ".csv";
const DATE_FORMAT: &str = "%Y%m%d";
const RANGE_BOUND_FORMAT: &str = "%Y-%m-%d";

/// Daily log filename for a collection day.
pub fn log_filename(date: NaiveDate) -> String {
    format!("{LOG_PREFIX}{}{LOG_SUFFIX}", date.format(DATE_FORMAT))
}

/// Extract the embedded collection day from a daily log filename.
///
/// Returns `None` for any name outside the contract: wrong prefix or suffix,
/// a date part that is not exactly eight digits, or digits that do not form
/// a calendar date.
pub fn parse_log_filename_date(name: &str) -> Option<NaiveDate> {
    let digits = name.strip_prefix(LOG_PREFIX)?.strip_suffix(LOG_SUFFIX)?;
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(digits, DATE_FORMAT).ok()
}

/// The most recently modified daily log in `dir`.
pub fn find_latest(dir: &Path) -> Result<PathBuf> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for path in list_log_files(dir)? {
        // Files that vanish or cannot be stat'ed between listing and here
        // are simply not candidates.
        let Ok(modified) = fs::metadata(&path).and_then(|m| m.modified()) else {
            continue;
        };
        if latest.as_ref().is_none_or(|(t, _)| modified > *t) {
            latest = Some((modified, path));
        }
    }
    latest
        .map(|(_, path)| path)
        .ok_or(Error::NotFound {
            pattern: LOG_FILE_PATTERN,
        })
}

/// All daily logs whose embedded date lies in the inclusive range
/// `from..=to`, in filename order.
///
/// Both bounds are `YYYY-MM-DD` strings. An empty result is legitimate (the
/// range simply matched nothing); [`Error::NotFound`] is only raised when no
/// file matches the naming pattern at all.
pub fn find_in_range(dir: &Path, from: &str, to: &str) -> Result<Vec<PathBuf>> {
    let from = parse_range_bound(from)?;
    let to = parse_range_bound(to)?;
    // Inclusive upper bound: strictly before the day after `to`.
    let end = to.succ_opt().unwrap_or(NaiveDate::MAX);

    let mut matched = Vec::new();
    for path in list_log_files(dir)? {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date) = parse_log_filename_date(name) else {
            continue;
        };
        if date >= from && date < end {
            matched.push(path);
        }
    }
    Ok(matched)
}

fn parse_range_bound(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, RANGE_BOUND_FORMAT)
        .map_err(|_| Error::InvalidDateFormat(raw.to_string()))
}

/// Every file in `dir` matching the daily log naming pattern, sorted by
/// filename so that downstream merging is deterministic (filename order is
/// date order for the zero-padded contract).
fn list_log_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(LOG_PREFIX) && name.ends_with(LOG_SUFFIX) {
            files.push(entry.path());
        }
    }
    if files.is_empty() {
        return Err(Error::NotFound {
            pattern: LOG_FILE_PATTERN,
        });
    }
    files.sort();
    Ok(files)
}
