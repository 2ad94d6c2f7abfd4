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

//! gymstats turns daily gym occupancy sample logs into the JSON time series
//! the dashboard chart consumes.
//!
//! - [`locator`] - daily log file discovery and the filename date contract
//! - [`parser`] - tolerant header-driven CSV parsing of sample rows
//! - [`timezone`] - UTC-to-local conversion, 2-minute bucketing, ISO rendering
//! - [`aggregate`] - per-location merge and deterministic ordering
//! - [`snapshot`] - atomic replacement of the dashboard data file
//! - [`pipeline`] - the regeneration entry points the server invokes
//! - [`server`] - HTTP endpoints, CORS and static file serving

pub mod aggregate;
pub mod error;
pub mod locator;
pub mod parser;
pub mod pipeline;
pub mod server;
pub mod snapshot;
pub mod timezone;
pub mod types;

pub use error::{Error, Result};
