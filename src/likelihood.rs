//! Per-feature likelihood terms for the multinomial and Gaussian families

use std::f64::consts::PI;

/// Gaussian log-density variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GaussianDensity {
    /// Reference scoring: `-0.5 * ln(2π) * σ - 0.5 * (x - μ) / σ`.
    ///
    /// This is not the normal log-density, but it is what earlier releases of this
    /// model computed and changing it changes which class wins.
    #[default]
    Reference,
    /// Textbook normal log-density: `-0.5 * ln(2π) - ln(σ) - 0.5 * ((x - μ) / σ)²`
    Standard,
}

impl GaussianDensity {
    /// Log-likelihood contribution of a single feature value
    pub fn log_density(&self, value: f64, mu: f64, sigma: f64) -> f64 {
        let ln_2pi = (2.0 * PI).ln();
        match self {
            GaussianDensity::Reference => -0.5 * ln_2pi * sigma - 0.5 * (value - mu) / sigma,
            GaussianDensity::Standard => {
                let z = (value - mu) / sigma;
                -0.5 * ln_2pi - sigma.ln() - 0.5 * z * z
            }
        }
    }
}

/// Laplace-smoothed log conditional probability of a feature within a class
///
/// `ln(count + alpha) - ln(total + n_features * alpha)`
pub fn multinomial_log_prob(count: f64, total: f64, alpha: f64, n_features: usize) -> f64 {
    (count + alpha).ln() - (total + n_features as f64 * alpha).ln()
}

/// Contribution of a single count to a multinomial log-likelihood.
///
/// Zero counts contribute exactly zero, even when `log_prob` is `-inf` or NaN.
pub fn multinomial_term(value: f64, log_prob: f64) -> f64 {
    if value != 0.0 {
        value * log_prob
    } else {
        0.0
    }
}
