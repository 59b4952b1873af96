use ndarray::Array1;

/// Numerically stable `ln(sum(exp(values)))`.
pub(crate) fn log_sum_exp(values: &Array1<f64>) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    let sum: f64 = values.iter().map(|&v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Turns joint log likelihoods into posterior probabilities that sum to one.
pub(crate) fn softmax_from_log(values: &Array1<f64>) -> Array1<f64> {
    let norm = log_sum_exp(values);
    values.mapv(|v| (v - norm).exp())
}

/// Index of the first maximum, mirroring `argmax` semantics on ties.
pub(crate) fn argmax(values: &Array1<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

pub(crate) fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}
