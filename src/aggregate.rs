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

//! Merging per-file series into chart datasets.
//!
//! Pure and deterministic: the same maps in the same order always produce
//! the same datasets, so a regeneration over an unchanged file set is
//! byte-identical downstream.

use crate::parser::LocationSeries;
use crate::types::Dataset;

/// Deep-merge per-file series maps, given in file order, into datasets.
///
/// Points of one location are sorted by `x` ascending; the ISO rendering
/// makes lexicographic order chronological. The sort is stable, so equal
/// x values keep file-then-row order. Datasets come out sorted by label
/// ascending.
pub fn merge(per_file: Vec<LocationSeries>) -> Vec<Dataset> {
    let mut merged = LocationSeries::new();
    for series in per_file {
        for (location, mut points) in series {
            merged.entry(location).or_default().append(&mut points);
        }
    }

    merged
        .into_iter()
        .map(|(label, mut data)| {
            data.sort_by(|a, b| a.x.cmp(&b.x));
            Dataset { label, data }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataPoint;

    fn point(x: &str, y: i64) -> DataPoint {
        DataPoint {
            x: x.to_string(),
            y,
        }
    }

    fn series(entries: &[(&str, &[DataPoint])]) -> LocationSeries {
        entries
            .iter()
            .map(|(label, points)| (label.to_string(), points.to_vec()))
            .collect()
    }

    #[test]
    fn sorts_points_chronologically_and_labels_alphabetically() {
        let file = series(&[
            (
                "Rocca",
                &[
                    point("2024-01-01T12:04:00+02:00", 3),
                    point("2024-01-01T12:00:00+02:00", 1),
                ],
            ),
            ("Hipodroom", &[point("2024-01-01T12:00:00+02:00", 5)]),
        ]);

        let datasets = merge(vec![file]);
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0].label, "Hipodroom");
        assert_eq!(datasets[1].label, "Rocca");
        assert_eq!(
            datasets[1].data,
            vec![
                point("2024-01-01T12:00:00+02:00", 1),
                point("2024-01-01T12:04:00+02:00", 3),
            ]
        );
    }

    #[test]
    fn merges_one_location_across_files_in_file_order() {
        let day1 = series(&[("Hipodroom", &[point("2024-01-01T12:00:00+02:00", 5)])]);
        let day2 = series(&[("Hipodroom", &[point("2024-01-02T12:00:00+02:00", 7)])]);

        let datasets = merge(vec![day1, day2]);
        assert_eq!(datasets.len(), 1);
        assert_eq!(
            datasets[0].data,
            vec![
                point("2024-01-01T12:00:00+02:00", 5),
                point("2024-01-02T12:00:00+02:00", 7),
            ]
        );
    }

    #[test]
    fn equal_x_values_keep_file_then_row_order() {
        let x = "2024-01-01T12:00:00+02:00";
        let first = series(&[("Hipodroom", &[point(x, 1), point(x, 2)])]);
        let second = series(&[("Hipodroom", &[point(x, 3)])]);

        let datasets = merge(vec![first, second]);
        let ys: Vec<i64> = datasets[0].data.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![1, 2, 3]);
    }

    #[test]
    fn empty_input_produces_no_datasets() {
        assert!(merge(Vec::new()).is_empty());
    }
}
