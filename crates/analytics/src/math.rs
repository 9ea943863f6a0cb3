//! Statistical helpers shared by the metric calculations.

/// Mean of a slice of values.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (denominator N, not N-1).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Downside deviation: squared deviations of the values strictly below the
/// mean, divided by the full sample size N. The asymmetric denominator is the
/// Sortino-family convention.
pub fn downside_deviation(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let downside_sum: f64 = values
        .iter()
        .filter(|v| **v < avg)
        .map(|v| (v - avg) * (v - avg))
        .sum();
    Some((downside_sum / values.len() as f64).sqrt())
}
