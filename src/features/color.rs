//! Per-channel color statistics.

use ndarray::{Array3, Axis};

/// One L1-normalized histogram per channel over `[0, 1]`.
///
/// Bins are equal-width with edges at `i / bins`; the last bin is closed so
/// a value of exactly 1.0 is counted. Values outside the range are ignored.
pub fn channel_histograms(pixels: &Array3<f64>, bins: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(pixels.dim().2 * bins);
    for channel in pixels.axis_iter(Axis(2)) {
        let mut counts = vec![0u64; bins];
        for &v in channel.iter() {
            if let Some(bin) = bin_index(v, bins) {
                counts[bin] += 1;
            }
        }
        let total: u64 = counts.iter().sum();
        if total == 0 {
            out.extend(std::iter::repeat_n(0.0, bins));
        } else {
            out.extend(counts.iter().map(|&c| c as f64 / total as f64));
        }
    }
    out
}

fn bin_index(v: f64, bins: usize) -> Option<usize> {
    if !(0.0..=1.0).contains(&v) {
        return None;
    }
    if v == 1.0 {
        return Some(bins - 1);
    }
    let mut bin = ((v * bins as f64) as usize).min(bins - 1);
    // Guard against rounding placing a value on the wrong side of an edge.
    let edge = |i: usize| i as f64 / bins as f64;
    if v < edge(bin) {
        bin -= 1;
    } else if bin + 1 < bins && v >= edge(bin + 1) {
        bin += 1;
    }
    Some(bin)
}

/// Per-channel means followed by per-channel population standard deviations.
pub fn channel_moments(pixels: &Array3<f64>) -> Vec<f64> {
    let channels = pixels.dim().2;
    let mut means = Vec::with_capacity(channels);
    let mut stds = Vec::with_capacity(channels);
    for channel in pixels.axis_iter(Axis(2)) {
        let n = channel.len() as f64;
        let mean = channel.sum() / n;
        let var = channel.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        means.push(mean);
        stds.push(var.sqrt());
    }
    means.extend(stds);
    means
}
