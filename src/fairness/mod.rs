// Atkinson inequality index over a resource distribution

use std::fmt;

#[cfg(test)]
mod tests;

/// Inequality-aversion parameter used when none is configured
pub const DEFAULT_EPSILON: f64 = 0.5;

/// Errors from the fairness engine
#[derive(Debug, Clone, PartialEq)]
pub enum FairnessError {
    /// A share was negative, NaN or infinite
    InvalidDistribution { index: usize, value: f64 },
    /// Epsilon must be finite and non-negative
    InvalidEpsilon(f64),
}

impl fmt::Display for FairnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FairnessError::InvalidDistribution { index, value } => write!(
                f,
                "invalid distribution: share {} is {} (must be finite and non-negative)",
                index, value
            ),
            FairnessError::InvalidEpsilon(eps) => {
                write!(f, "epsilon must be finite and non-negative, got {}", eps)
            }
        }
    }
}

impl std::error::Error for FairnessError {}

/// Computes the Atkinson index of `distribution` for aversion `epsilon`.
///
/// Returns a value in [0, 1] where 0 is perfect equality:
/// - `A(ε) = 1 - (1/μ) · [(1/n) Σ xᵢ^(1-ε)]^(1/(1-ε))` for ε ≠ 1
/// - `A(1) = 1 - (1/μ) · (Π xᵢ)^(1/n)`
///
/// An empty distribution and a distribution with zero mean are both
/// treated as perfectly equal. With ε ≥ 1 a single zero share drives the
/// index to its limit of 1.
pub fn atkinson_index(distribution: &[f64], epsilon: f64) -> Result<f64, FairnessError> {
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err(FairnessError::InvalidEpsilon(epsilon));
    }

    if let Some((index, &value)) = distribution
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(FairnessError::InvalidDistribution { index, value });
    }

    if distribution.is_empty() {
        return Ok(0.0);
    }

    // The index is scale-invariant; shares are divided by the largest one so
    // sums and powers stay finite at extreme magnitudes.
    let max = distribution.iter().copied().fold(0.0_f64, f64::max);
    if max == 0.0 {
        return Ok(0.0);
    }

    let has_zero = distribution.iter().any(|&x| x == 0.0);
    if epsilon >= 1.0 && has_zero {
        return Ok(1.0);
    }

    let n = distribution.len() as f64;
    let scaled = distribution.iter().map(|&x| x / max);
    let mean = scaled.clone().sum::<f64>() / n;

    let equally_distributed = if (epsilon - 1.0).abs() < f64::EPSILON {
        // Geometric mean, in log space to avoid overflow on long inputs
        let log_sum: f64 = scaled.map(f64::ln).sum();
        (log_sum / n).exp()
    } else {
        let exponent = 1.0 - epsilon;
        let power_mean = scaled.map(|x| x.powf(exponent)).sum::<f64>() / n;
        power_mean.powf(1.0 / exponent)
    };

    Ok((1.0 - equally_distributed / mean).clamp(0.0, 1.0))
}
