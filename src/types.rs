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

//! Chart-facing data shapes, serialized verbatim into the snapshot file.

use serde::{Deserialize, Serialize};

/// One sample on the chart: local bucketed timestamp and the user count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: String,
    pub y: i64,
}

/// One line on the chart: a gym location and its samples sorted by `x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<DataPoint>,
}
