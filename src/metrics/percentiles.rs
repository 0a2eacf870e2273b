/// Percentile of an ascending slice with linear interpolation between the
/// two closest ranks.
///
/// `percentile` is in `[0, 100]`. Returns `None` for an empty slice.
#[must_use]
pub fn percentile_linear(sorted: &[f64], percentile: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let percentile = percentile.clamp(0.0, 100.0);
    let rank = percentile / 100.0 * last as f64;
    let lower_rank = rank.floor();
    let lower_idx = (lower_rank as usize).min(last);
    let upper_idx = lower_idx.saturating_add(1).min(last);

    let lower = *sorted.get(lower_idx)?;
    let upper = *sorted.get(upper_idx)?;
    Some((upper - lower).mul_add(rank - lower_rank, lower))
}
