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

//! The persisted dashboard snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::Dataset;

/// Fixed snapshot filename the dashboard fetches.
pub const SNAPSHOT_FILENAME: &str = "gym-data.json";

/// Serialize datasets as pretty-printed JSON and replace the snapshot.
///
/// The bytes go to a temporary file in the same directory first and are
/// renamed into place, so readers either see the previous snapshot or the
/// complete new one, never a truncated write.
pub fn write_snapshot(dir: &Path, datasets: &[Dataset]) -> Result<PathBuf> {
    let mut json = serde_json::to_vec_pretty(datasets)?;
    json.push(b'\n');

    let path = dir.join(SNAPSHOT_FILENAME);
    let tmp = dir.join(format!("{SNAPSHOT_FILENAME}.tmp"));
    fs::write(&tmp, &json)?;
    fs::rename(&tmp, &path)?;
    Ok(path)
}
