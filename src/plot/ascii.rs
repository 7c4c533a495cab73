//! ASCII bar charts for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! When the series has more points than columns, adjacent points are grouped
//! and each column shows the group's maximum.

use crate::domain::TimeSeries;

/// Render a bar chart of `series` into a `width` x `height` grid plus a header.
pub fn render_bar_chart(series: &TimeSeries, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let columns = column_values(&series.values(), width);
    let y_max = columns.iter().copied().max().unwrap_or(0).max(1);

    let mut grid = vec![vec![' '; columns.len()]; height];
    for (x, &v) in columns.iter().enumerate() {
        let filled = bar_height(v, y_max, height);
        for row in grid.iter_mut().rev().take(filled) {
            row[x] = '#';
        }
    }

    let first = &series.points()[0].label;
    let last = &series.latest().label;
    let mut out = String::new();
    out.push_str(&format!("Plot: {first} .. {last} | y=[0, {y_max}]\n"));

    for row in grid {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Group values into at most `width` columns (max of each group).
fn column_values(values: &[i64], width: usize) -> Vec<i64> {
    if values.len() <= width {
        return values.to_vec();
    }
    let group = values.len().div_ceil(width);
    values
        .chunks(group)
        .map(|chunk| chunk.iter().copied().max().unwrap_or(0))
        .collect()
}

fn bar_height(value: i64, y_max: i64, height: usize) -> usize {
    if value <= 0 {
        return 0;
    }
    // Integer round-half-up of value / y_max * height.
    let (v, m, h) = (value as i128, y_max as i128, height as i128);
    let rows = (2 * v * h + m) / (2 * m);
    (rows as usize).clamp(1, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesPoint;

    fn series(values: &[i64]) -> TimeSeries {
        TimeSeries::from_points(
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| SeriesPoint {
                    label: format!("d{i}"),
                    value,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn golden_small_chart() {
        let txt = render_bar_chart(&series(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 10]), 10, 5);
        let expected = concat!(
            "Plot: d0 .. d9 | y=[0, 10]\n",
            "         #\n",
            "       ###\n",
            "     #####\n",
            "   #######\n",
            " #########\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn long_series_is_grouped() {
        assert_eq!(column_values(&[1, 5, 2, 2, 9, 0, 4], 3), vec![5, 9, 4]);
        let txt = render_bar_chart(&series(&vec![3; 40]), 10, 5);
        assert!(txt.lines().skip(1).all(|l| l == "##########"));
    }
}
