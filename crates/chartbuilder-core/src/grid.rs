// File: crates/chartbuilder-core/src/grid.rs
// Summary: Tick placement on "nice" steps (1, 2, 2.5, 5 x 10^k) and tick label formatting.

const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Default upper bound on tick count per axis.
pub const MAX_TICKS: usize = 9;

/// Smallest nice step that fits at most `max_ticks` intervals into `[min, max]`.
pub fn nice_step(min: f64, max: f64, max_ticks: usize) -> f64 {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    let raw = span / max_ticks.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    NICE_STEPS
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude)
}

/// Tick positions on a nice step inside `[min, max]` (inclusive).
pub fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || max < min {
        return Vec::new();
    }
    if max == min {
        return vec![min];
    }
    let step = nice_step(min, max, max_ticks);
    let first = (min / step - 1e-9).ceil();
    let last = (max / step + 1e-9).floor();
    if last < first {
        return Vec::new();
    }
    // Counted in integers: past 2^53 the step index no longer advances in f64.
    let count = ((last - first) as usize).min(max_ticks.max(1) * 2 + 1);
    let mut ticks: Vec<f64> = (0..=count)
        .map(|i| {
            let v = (first + i as f64) * step;
            // snap values like 1e-17 produced by float error back to zero
            if v.abs() < step * 1e-9 { 0.0 } else { v }
        })
        .collect();
    ticks.dedup();
    ticks
}

/// Number of decimals needed to print ticks spaced by `step` without ambiguity.
pub fn decimals_for(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let mut decimals = 0usize;
    let mut scaled = step;
    while decimals < 10 && (scaled - scaled.round()).abs() > 1e-6 * scaled.abs().max(1.0) {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

/// Format a tick value with the decimals implied by `step`.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = decimals_for(step);
    let text = format!("{:.*}", decimals, value);
    // "-0" and "-0.0" read badly on an axis
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_land_on_nice_steps() {
        let ticks = nice_ticks(0.0, 10.0, 6);
        assert_eq!(ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn ticks_stay_inside_range() {
        let ticks = nice_ticks(-0.35, 1.35, MAX_TICKS);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| *t >= -0.35 && *t <= 1.35));
        assert!(ticks.contains(&0.0));
    }

    #[test]
    fn quarter_steps_print_two_decimals() {
        assert_eq!(decimals_for(0.25), 2);
        assert_eq!(decimals_for(5.0), 0);
        assert_eq!(format_tick(0.5, 0.25), "0.50");
        assert_eq!(format_tick(-0.0, 1.0), "0");
    }

    #[test]
    fn huge_magnitudes_terminate() {
        let (min, max) = (1.7e18, 1.7e18 + 256.0);
        let ticks = nice_ticks(min - 12.8, max + 12.8, MAX_TICKS);
        assert!(ticks.len() <= MAX_TICKS * 2 + 2);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn degenerate_ranges() {
        assert!(nice_ticks(f64::NAN, 1.0, 5).is_empty());
        assert_eq!(nice_ticks(3.0, 3.0, 5), vec![3.0]);
    }
}
