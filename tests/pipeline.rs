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

//! End-to-end pipeline tests over real files in a temporary directory.

use std::fs;
use std::path::Path;

use gymstats::pipeline::{regenerate_latest, regenerate_range};
use gymstats::snapshot::SNAPSHOT_FILENAME;
use gymstats::timezone::LocalZone;
use gymstats::types::Dataset;
use gymstats::Error;

const HEADER: &str = "timestamp,location_id,location_name,user_count,status,response";

fn write_log(dir: &Path, name: &str, rows: &[&str]) {
    let mut contents = String::from(HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    fs::write(dir.join(name), contents).unwrap();
}

fn read_snapshot(dir: &Path) -> Vec<Dataset> {
    let raw = fs::read_to_string(dir.join(SNAPSHOT_FILENAME)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn range_request_merges_two_days_in_chronological_order() {
    let dir = tempfile::tempdir().unwrap();
    write_log(
        dir.path(),
        "gym-stats-20240101.csv",
        &[r#"2024-01-01 10:00:00,1,Hipodroom,5,success,"ok""#],
    );
    write_log(
        dir.path(),
        "gym-stats-20240102.csv",
        &[r#"2024-01-02 10:00:00,1,Hipodroom,7,success,"ok""#],
    );

    let zone = LocalZone::resolve("Europe/Tallinn");
    let summary = regenerate_range(dir.path(), "2024-01-01", "2024-01-02", &zone).unwrap();
    assert_eq!(summary.files.len(), 2);
    assert_eq!(summary.locations, 1);

    let datasets = read_snapshot(dir.path());
    assert_eq!(datasets.len(), 1);
    assert_eq!(datasets[0].label, "Hipodroom");

    let points: Vec<(&str, i64)> = datasets[0]
        .data
        .iter()
        .map(|p| (p.x.as_str(), p.y))
        .collect();
    // January is standard time in Tallinn: UTC+2, and 10:00 buckets to 12:00.
    assert_eq!(
        points,
        vec![
            ("2024-01-01T12:00:00+02:00", 5),
            ("2024-01-02T12:00:00+02:00", 7),
        ]
    );
}

#[test]
fn regeneration_is_byte_identical_on_an_unchanged_file_set() {
    let dir = tempfile::tempdir().unwrap();
    write_log(
        dir.path(),
        "gym-stats-20240101.csv",
        &[
            r#"2024-01-01 10:00:00,2,Rocca,12,success,"ok""#,
            r#"2024-01-01 10:00:03,1,Hipodroom,5,success,"ok""#,
            r#"2024-01-01 10:02:04,1,Hipodroom,parse_error,success,"weird""#,
            r#"2024-01-01 10:04:00,1,Hipodroom,error,error,"timeout""#,
        ],
    );

    let zone = LocalZone::fallback();
    regenerate_range(dir.path(), "2024-01-01", "2024-01-01", &zone).unwrap();
    let first = fs::read(dir.path().join(SNAPSHOT_FILENAME)).unwrap();
    regenerate_range(dir.path(), "2024-01-01", "2024-01-01", &zone).unwrap();
    let second = fs::read(dir.path().join(SNAPSHOT_FILENAME)).unwrap();

    assert_eq!(first, second);

    // Only the two usable rows made it through, labels sorted.
    let datasets = read_snapshot(dir.path());
    let labels: Vec<&str> = datasets.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["Hipodroom", "Rocca"]);
    assert_eq!(datasets[0].data.len(), 1);
    assert_eq!(datasets[1].data.len(), 1);
}

#[test]
fn latest_request_uses_only_the_most_recent_file() {
    let dir = tempfile::tempdir().unwrap();
    write_log(
        dir.path(),
        "gym-stats-20240101.csv",
        &[r#"2024-01-01 10:00:00,1,Hipodroom,5,success,"ok""#],
    );
    std::thread::sleep(std::time::Duration::from_millis(100));
    write_log(
        dir.path(),
        "gym-stats-20240102.csv",
        &[r#"2024-01-02 10:00:00,1,Hipodroom,7,success,"ok""#],
    );

    let summary = regenerate_latest(dir.path(), &LocalZone::fallback()).unwrap();
    assert_eq!(
        summary.files,
        vec![dir.path().join("gym-stats-20240102.csv")]
    );

    let datasets = read_snapshot(dir.path());
    assert_eq!(datasets[0].data.len(), 1);
    assert_eq!(datasets[0].data[0].y, 7);
}

#[test]
fn latest_request_without_any_logs_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = regenerate_latest(dir.path(), &LocalZone::fallback()).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(!dir.path().join(SNAPSHOT_FILENAME).exists());
}

#[test]
fn empty_range_reports_the_requested_bounds() {
    let dir = tempfile::tempdir().unwrap();
    write_log(
        dir.path(),
        "gym-stats-20240101.csv",
        &[r#"2024-01-01 10:00:00,1,Hipodroom,5,success,"ok""#],
    );

    let err = regenerate_range(dir.path(), "2023-05-01", "2023-05-31", &LocalZone::fallback())
        .unwrap_err();
    match err {
        Error::EmptyRange { from, to } => {
            assert_eq!(from, "2023-05-01");
            assert_eq!(to, "2023-05-31");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn a_file_with_missing_columns_fails_the_whole_request() {
    let dir = tempfile::tempdir().unwrap();
    write_log(
        dir.path(),
        "gym-stats-20240101.csv",
        &[r#"2024-01-01 10:00:00,1,Hipodroom,5,success,"ok""#],
    );
    fs::write(
        dir.path().join("gym-stats-20240102.csv"),
        "timestamp,location_name\n2024-01-02 10:00:00,Hipodroom\n",
    )
    .unwrap();

    let err = regenerate_range(dir.path(), "2024-01-01", "2024-01-02", &LocalZone::fallback())
        .unwrap_err();
    assert!(matches!(err, Error::MissingColumns { .. }));
    // Partial aggregates are never written.
    assert!(!dir.path().join(SNAPSHOT_FILENAME).exists());
}
