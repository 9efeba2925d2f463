use crate::{SignalError, SignalResult};

/// Arithmetic mean. Fails on an empty slice rather than returning NaN.
pub fn mean(samples: &[f64]) -> SignalResult<f64> {
    if samples.is_empty() {
        return Err(SignalError::Domain("mean of empty sequence".into()));
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Sample standard deviation (Bessel-corrected, divisor n - 1).
///
/// Undefined for fewer than two samples; fails rather than defaulting to
/// zero or NaN, since a silent degenerate value would corrupt downstream
/// plots.
pub fn sample_stdev(samples: &[f64]) -> SignalResult<f64> {
    if samples.len() < 2 {
        return Err(SignalError::Domain(format!(
            "sample stdev needs at least 2 samples, got {}",
            samples.len()
        )));
    }
    let m = mean(samples)?;
    let sum_sq: f64 = samples.iter().map(|&v| (v - m).powi(2)).sum();
    Ok((sum_sq / (samples.len() - 1) as f64).sqrt())
}
