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

use std::path::PathBuf;

use thiserror::Error;

/// Failures the regeneration pipeline reports to its caller.
///
/// Row-level problems (bad quoting, unparsable timestamps or counts) are
/// deliberately not represented here: the parser drops such rows silently.
#[derive(Debug, Error)]
pub enum Error {
    /// A range bound was not a `YYYY-MM-DD` date.
    #[error("invalid date format {0:?} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    /// No file in the data directory matches the daily log naming pattern.
    #[error("no CSV files found matching {pattern}")]
    NotFound { pattern: &'static str },

    /// The pattern matched files, but none dated inside the requested range.
    #[error("no CSV files found for date range {from} to {to}")]
    EmptyRange { from: String, to: String },

    /// A log file is missing one or more of the required header columns.
    #[error("missing required columns in {}: {columns}", .file.display())]
    MissingColumns { file: PathBuf, columns: String },

    /// A log file has no readable header row.
    #[error("missing or unreadable header row in {}", .file.display())]
    MalformedHeader { file: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
