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

//! Regeneration entry points: locate files, parse, merge, write snapshot.
//!
//! A regeneration rebuilds the snapshot from scratch for its file set; there
//! is no incremental merging with a previous snapshot. Either every selected
//! file parses (row tolerance aside) and the snapshot is replaced, or the
//! request fails as a whole and no partial aggregate is written.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::timezone::LocalZone;
use crate::{aggregate, locator, parser, snapshot};

/// What a successful regeneration worked on.
#[derive(Debug, Clone)]
pub struct RegenerateSummary {
    /// The daily log files that fed the snapshot, in processing order.
    pub files: Vec<PathBuf>,
    /// Number of distinct location series in the snapshot.
    pub locations: usize,
    /// Where the snapshot was written.
    pub snapshot: PathBuf,
}

/// Rebuild the snapshot from the most recently modified daily log.
pub fn regenerate_latest(dir: &Path, zone: &LocalZone) -> Result<RegenerateSummary> {
    let file = locator::find_latest(dir)?;
    regenerate(dir, vec![file], zone)
}

/// Rebuild the snapshot from every daily log dated within `from..=to`.
pub fn regenerate_range(
    dir: &Path,
    from: &str,
    to: &str,
    zone: &LocalZone,
) -> Result<RegenerateSummary> {
    let files = locator::find_in_range(dir, from, to)?;
    if files.is_empty() {
        return Err(Error::EmptyRange {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    regenerate(dir, files, zone)
}

fn regenerate(dir: &Path, files: Vec<PathBuf>, zone: &LocalZone) -> Result<RegenerateSummary> {
    let mut per_file = Vec::with_capacity(files.len());
    for file in &files {
        per_file.push(parser::parse_log_file(file, zone)?);
    }

    let datasets = aggregate::merge(per_file);
    let snapshot = snapshot::write_snapshot(dir, &datasets)?;

    Ok(RegenerateSummary {
        files,
        locations: datasets.len(),
        snapshot,
    })
}
