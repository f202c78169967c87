// File: crates/chartbuilder-core/src/data.rs
// Summary: Stateless data-shaping helpers: counting, sorting, percentages, range buckets,
//          histogram bins, cropping and row sanitising.

use std::cmp::Ordering;

use log::debug;
use num_traits::ToPrimitive;

/// Count how often each distinct value occurs.
/// Entries come out in first-seen order; callers should not rely on that order.
pub fn count_occurrences<T: PartialEq + Clone>(values: &[T]) -> Vec<(T, usize)> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for v in values {
        match counts.iter_mut().find(|(seen, _)| seen == v) {
            Some((_, n)) => *n += 1,
            None => counts.push((v.clone(), 1)),
        }
    }
    counts
}

/// Stable sort of pairs by their first component. Incomparable keys (NaN) keep their order.
pub fn sort_by_first<A: PartialOrd, B>(mut pairs: Vec<(A, B)>) -> Vec<(A, B)> {
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    pairs
}

/// Stable sort of pairs by their second component. Incomparable keys (NaN) keep their order.
pub fn sort_by_second<A, B: PartialOrd>(mut pairs: Vec<(A, B)>) -> Vec<(A, B)> {
    pairs.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    pairs
}

/// Round to two decimals.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Turn `(value, count)` pairs into `(value, percent of total)`, rounded to two decimals.
/// A zero total maps every entry to `0.0`.
pub fn to_percentages<T: Clone, N: ToPrimitive>(counted: &[(T, N)]) -> Vec<(T, f64)> {
    let total: f64 = counted.iter().filter_map(|(_, n)| n.to_f64()).sum();
    counted
        .iter()
        .map(|(v, n)| {
            let n = n.to_f64().unwrap_or(0.0);
            let pct = if total == 0.0 { 0.0 } else { round2(n * 100.0 / total) };
            (v.clone(), pct)
        })
        .collect()
}

/// Bucket starts `floor(min) - 1, +step, ...` while below `max + step`.
/// Empty for empty input or a step that is not positive and finite.
pub fn bucket_starts(values: &[f64], step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let Some((min, max)) = finite_min_max(values) else {
        return Vec::new();
    };
    let first = min.floor() - 1.0;
    let end = max + step;
    let mut starts = Vec::new();
    let mut k = 0.0;
    loop {
        let b = first + k * step;
        if b >= end {
            break;
        }
        starts.push(b);
        k += 1.0;
    }
    starts
}

fn finite_min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Tag every source value with the bounds `[start, start + step)` of the bucket containing it.
/// Output is grouped by bucket, values inside a bucket keep their source order.
pub fn to_ranges(values: &[f64], step: f64) -> Vec<(f64, f64)> {
    bucket_starts(values, step)
        .into_iter()
        .flat_map(|b| {
            values
                .iter()
                .filter(move |v| b <= **v && **v < b + step)
                .map(move |_| (b, b + step))
        })
        .collect()
}

/// One histogram bin: `[start, end)`, the last bin of a histogram also includes `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Histogram over the bucket edges of [`bucket_starts`].
pub fn histogram_bins(values: &[f64], step: f64) -> Vec<Bin> {
    let edges = bucket_starts(values, step);
    if edges.len() < 2 {
        return Vec::new();
    }
    let last = edges.len() - 2;
    edges
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let (start, end) = (w[0], w[1]);
            let count = values
                .iter()
                .filter(|&&v| v >= start && (v < end || (i == last && v == end)))
                .count();
            Bin { start, end, count }
        })
        .collect()
}

/// Keep points strictly inside the open rectangle `(min_x, max_x) x (min_y, max_y)`.
pub fn crop<X, Y>(points: &[(X, Y)], min_x: X, min_y: Y, max_x: X, max_y: Y) -> Vec<(X, Y)>
where
    X: PartialOrd + Copy,
    Y: PartialOrd + Copy,
{
    points
        .iter()
        .copied()
        .filter(|(x, y)| *x > min_x && *x < max_x && *y > min_y && *y < max_y)
        .collect()
}

/// Keep only rows that are exactly two finite numbers, as `(x, y)` pairs.
pub fn well_formed_pairs<R: AsRef<[f64]>>(rows: impl IntoIterator<Item = R>) -> Vec<(f64, f64)> {
    let mut dropped = 0usize;
    let pairs: Vec<(f64, f64)> = rows
        .into_iter()
        .filter_map(|row| match *row.as_ref() {
            [x, y] if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => {
                dropped += 1;
                None
            }
        })
        .collect();
    if dropped > 0 {
        debug!("dropped {dropped} malformed row(s), kept {}", pairs.len());
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_distinct_values() {
        let counts = count_occurrences(&[7, 3, 7, 7, 1]);
        assert_eq!(counts, vec![(7, 3), (3, 1), (1, 1)]);
    }

    #[test]
    fn sort_is_stable() {
        let sorted = sort_by_first(vec![(1, 'b'), (0, 'z'), (1, 'a')]);
        assert_eq!(sorted, vec![(0, 'z'), (1, 'b'), (1, 'a')]);
    }

    #[test]
    fn percentages_of_zero_total() {
        assert_eq!(to_percentages(&[("a", 0u32)]), vec![("a", 0.0)]);
    }

    #[test]
    fn bucket_starts_cover_max() {
        let starts = bucket_starts(&[5.0, 15.0, 25.0], 10.0);
        assert_eq!(starts, vec![4.0, 14.0, 24.0, 34.0]);
        assert!(bucket_starts(&[1.0], 0.0).is_empty());
        assert!(bucket_starts(&[], 1.0).is_empty());
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [1.0, 2.0, 2.5, 9.0, 10.0, 11.0];
        let bins = histogram_bins(&values, 5.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].start, 0.0);
    }

    #[test]
    fn malformed_rows_are_dropped() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![1.0, 2.0, 3.0], vec![f64::NAN, 1.0], vec![4.0, 5.0]];
        assert_eq!(well_formed_pairs(&rows), vec![(1.0, 2.0), (4.0, 5.0)]);
    }
}
