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

//! Timestamp normalization.
//!
//! The collector records UTC wall-clock timestamps. The chart axis is local
//! civil time, so every timestamp is reinterpreted as UTC, converted into the
//! configured zone, floored to a 2-minute bucket and rendered as ISO-8601
//! with an explicit offset. Bucketing absorbs the small drift between
//! collection cycles so same-cycle samples from different locations land on
//! the same x value.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Wire format of the `timestamp` column, as written by the collector.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
const BUCKET_MINUTES: u32 = 2;
const FALLBACK_OFFSET_SECS: i32 = 2 * 3600;

/// The zone the chart axis is rendered in.
///
/// Injected into the pipeline rather than looked up ambiently, so tests can
/// force the fixed-offset fallback deterministically. The fallback carries no
/// daylight-saving rules and is only approximately correct during DST
/// periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalZone {
    /// Full civil zone rules (standard and daylight-saving offsets).
    Named(Tz),
    /// Fixed offset, no daylight adjustment.
    Fixed(FixedOffset),
}

impl LocalZone {
    /// Resolve a zone by IANA name, falling back to UTC+2 when the name is
    /// not in the compiled-in zone database.
    pub fn resolve(name: &str) -> Self {
        match name.parse::<Tz>() {
            Ok(tz) => Self::Named(tz),
            Err(_) => Self::fallback(),
        }
    }

    /// The fixed UTC+2 fallback zone.
    pub fn fallback() -> Self {
        Self::Fixed(FixedOffset::east_opt(FALLBACK_OFFSET_SECS).expect("static offset"))
    }
}

/// Normalize one collector timestamp into its chart x value.
///
/// Returns `None` when `raw` does not match [`TIMESTAMP_FORMAT`] exactly;
/// the caller drops the row.
pub fn normalize_timestamp(raw: &str, zone: &LocalZone) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()?;
    // Reinterpretation, not conversion: the numeric fields already are UTC.
    let utc = Utc.from_utc_datetime(&naive);
    Some(match zone {
        LocalZone::Named(tz) => bucketed_iso(utc.with_timezone(tz)),
        LocalZone::Fixed(offset) => bucketed_iso(utc.with_timezone(offset)),
    })
}

/// Floor the local minute to the nearest even value, zero the seconds and
/// render with the zone offset at that instant.
fn bucketed_iso<Z>(local: DateTime<Z>) -> String
where
    Z: TimeZone,
    Z::Offset: fmt::Display,
{
    let trim = Duration::seconds(
        i64::from(local.second()) + 60 * i64::from(local.minute() % BUCKET_MINUTES),
    );
    (local - trim).format(ISO_FORMAT).to_string()
}
