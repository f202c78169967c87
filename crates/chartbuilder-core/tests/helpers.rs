// File: crates/chartbuilder-core/tests/helpers.rs
// Purpose: Data-shaping helpers: counting, sorting, percentages, range buckets, bins and cropping.

use chartbuilder_core::{
    count_occurrences, crop, histogram_bins, sort_by_first, sort_by_second, to_percentages, to_ranges,
};

#[test]
fn sorts_by_either_component() {
    let pairs = vec![(3, 1), (1, 2), (2, 3)];
    assert_eq!(sort_by_first(pairs.clone()), vec![(1, 2), (2, 3), (3, 1)]);
    assert_eq!(sort_by_second(pairs), vec![(3, 1), (1, 2), (2, 3)]);
}

#[test]
fn percentages_of_counts() {
    assert_eq!(to_percentages(&[("a", 3), ("b", 1)]), vec![("a", 75.0), ("b", 25.0)]);
    // Rounded to two decimals.
    let thirds = to_percentages(&[("x", 1), ("y", 2)]);
    assert_eq!(thirds, vec![("x", 33.33), ("y", 66.67)]);
}

#[test]
fn count_then_percent() {
    let words = ["tea", "coffee", "tea", "water", "tea", "coffee"];
    let mut counts = count_occurrences(&words);
    counts.sort();
    assert_eq!(counts, vec![("coffee", 2), ("tea", 3), ("water", 1)]);

    let shares = to_percentages(&counts);
    let total: f64 = shares.iter().map(|(_, p)| p).sum();
    assert!((total - 100.0).abs() < 0.02);
}

#[test]
fn every_value_lands_in_its_range() {
    let values = [5.0, 15.0, 25.0];
    let ranges = to_ranges(&values, 10.0);
    assert_eq!(ranges.len(), values.len());
    for (v, (start, end)) in values.iter().zip(&ranges) {
        assert_eq!(end - start, 10.0);
        assert!(start <= v && v < end, "{v} not in [{start}, {end})");
    }
}

#[test]
fn ranges_are_grouped_by_bucket() {
    let ranges = to_ranges(&[12.0, 3.0, 14.0], 5.0);
    // Buckets start at floor(3) - 1 = 2: [2,7) then [12,17) twice.
    assert_eq!(ranges, vec![(2.0, 7.0), (12.0, 17.0), (12.0, 17.0)]);
}

#[test]
fn last_bin_is_closed() {
    let bins = histogram_bins(&[1.0, 10.0], 5.0);
    assert_eq!(bins.len(), 2);
    assert_eq!((bins[1].start, bins[1].end), (5.0, 10.0));
    assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1]);
}

#[test]
fn crop_is_strict() {
    let pts = [(0, 0), (5, 5), (10, 5), (5, 10), (9, 9)];
    assert_eq!(crop(&pts, 0, 0, 10, 10), vec![(5, 5), (9, 9)]);
    let float_pts = [(0.5, 0.5), (-1.0, 0.5)];
    assert_eq!(crop(&float_pts, 0.0, 0.0, 1.0, 1.0), vec![(0.5, 0.5)]);
}

#[test]
fn empty_input_is_empty_output() {
    assert!(to_ranges(&[], 10.0).is_empty());
    assert!(histogram_bins(&[], 10.0).is_empty());
    assert!(count_occurrences::<i32>(&[]).is_empty());
}
