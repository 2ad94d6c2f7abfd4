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

//! Tolerant parsing of one daily log file.
//!
//! The logs are appended by a collector that occasionally writes partial or
//! legacy rows, so row-level problems are never fatal: a row that cannot be
//! used is dropped and the rest of the file is still processed. Only
//! file-level problems (unopenable file, missing header columns) abort the
//! request.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{Error, Result};
use crate::timezone::{normalize_timestamp, LocalZone};
use crate::types::DataPoint;

/// Columns the pipeline needs; everything else in the row is ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = ["timestamp", "location_name", "user_count", "status"];

const STATUS_SUCCESS: &str = "success";

/// Per-file accumulator: location name, exactly as spelled in the rows,
/// mapped to its samples in row order.
pub type LocationSeries = BTreeMap<String, Vec<DataPoint>>;

/// Header positions of the required columns. The header defines the order;
/// nothing about column positions is assumed.
struct ColumnIndex {
    timestamp: usize,
    location_name: usize,
    user_count: usize,
    status: usize,
}

/// Parse one daily log into a per-location series map.
///
/// Rows survive only if they have all four required fields, report
/// `status == success`, carry a timestamp in the collector's wire format and
/// an integer `user_count`. Everything else is dropped silently.
pub fn parse_log_file(path: &Path, zone: &LocalZone) -> Result<LocationSeries> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = match reader.headers() {
        Ok(headers) if !headers.is_empty() => headers.clone(),
        _ => {
            return Err(Error::MalformedHeader {
                file: path.to_path_buf(),
            })
        }
    };
    let columns = locate_columns(&headers, path)?;

    let mut series = LocationSeries::new();
    for record in reader.records() {
        // Malformed rows (bad quoting, encoding) are skipped, not fatal.
        let Ok(record) = record else { continue };
        // Short rows miss at least one required field and are skipped too.
        let (Some(timestamp), Some(location), Some(user_count), Some(status)) = (
            record.get(columns.timestamp),
            record.get(columns.location_name),
            record.get(columns.user_count),
            record.get(columns.status),
        ) else {
            continue;
        };
        if status != STATUS_SUCCESS {
            continue;
        }
        let Some(x) = normalize_timestamp(timestamp, zone) else {
            continue;
        };
        // `user_count` holds `error` / `parse_error` markers on failed
        // samples; those never have status success, but guard anyway.
        let Ok(y) = user_count.parse::<i64>() else {
            continue;
        };
        series
            .entry(location.to_string())
            .or_default()
            .push(DataPoint { x, y });
    }

    Ok(series)
}

fn locate_columns(headers: &StringRecord, path: &Path) -> Result<ColumnIndex> {
    let position = |name: &str| headers.iter().position(|h| h == name);
    match (
        position("timestamp"),
        position("location_name"),
        position("user_count"),
        position("status"),
    ) {
        (Some(timestamp), Some(location_name), Some(user_count), Some(status)) => Ok(ColumnIndex {
            timestamp,
            location_name,
            user_count,
            status,
        }),
        _ => {
            let missing: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|name| position(name).is_none())
                .collect();
            Err(Error::MissingColumns {
                file: path.to_path_buf(),
                columns: missing.join(", "),
            })
        }
    }
}
