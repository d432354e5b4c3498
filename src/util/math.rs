//! Percentile arithmetic for class group cuts.

/// Position of percentile `p` within a group of `len` samples, rounded down.
///
/// `p` is expected in `[0, 1]`; the result is clamped to `len` so floating
/// error never produces an out-of-range cut.
pub(crate) fn percentile_pos(p: f64, len: usize) -> usize {
    let pos = (p * len as f64).floor();
    if pos <= 0.0 {
        return 0;
    }
    (pos as usize).min(len)
}

/// Returns true when `value` lies in the closed unit interval.
pub(crate) fn in_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
