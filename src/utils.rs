//! Utility functions shared by the naive Bayes models

use crate::error::{Error, Result};
use crate::matrix::FeatureMatrix;
use ndarray::ArrayView1;
use std::collections::HashSet;
use std::hash::Hash;

/// Sum of a sequence of values
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean; NaN for an empty sequence
pub fn mean(values: &[f64]) -> f64 {
    ArrayView1::from(values).mean().unwrap_or(f64::NAN)
}

/// Sample standard deviation (divides by `n - 1`); NaN when fewer than two values
pub fn sample_stdev(values: &[f64]) -> f64 {
    // ndarray panics when ddof exceeds the length
    if values.len() < 2 {
        return f64::NAN;
    }
    ArrayView1::from(values).std(1.0)
}

/// Largest value; `-inf` for an empty sequence
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Elementwise exponential
pub fn exp(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.exp()).collect()
}

/// Elementwise `values - scalar`
pub fn subtract(values: &[f64], scalar: f64) -> Vec<f64> {
    values.iter().map(|v| v - scalar).collect()
}

/// Distinct values of a label vector, in order of first occurrence
pub fn unique_values<L: Clone + Eq + Hash>(labels: ArrayView1<L>) -> Vec<L> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for label in labels.iter() {
        if seen.insert(label) {
            unique.push(label.clone());
        }
    }

    unique
}

/// Row indices belonging to each class, in class order
pub fn class_indices<L: PartialEq>(labels: ArrayView1<L>, classes: &[L]) -> Vec<Vec<usize>> {
    let mut indices = vec![Vec::new(); classes.len()];

    for (row, label) in labels.iter().enumerate() {
        if let Some(class_idx) = classes.iter().position(|c| c == label) {
            indices[class_idx].push(row);
        }
    }

    indices
}

/// Index of the largest score; ties keep the earliest index.
///
/// The running maximum is only replaced on a strict `>`, so a NaN score never wins
/// unless it sits at index 0, in which case nothing can beat it.
pub fn argmax(scores: &[f64]) -> Option<usize> {
    let (first, rest) = scores.split_first()?;
    let mut best_idx = 0;
    let mut best = *first;

    for (i, &score) in rest.iter().enumerate() {
        if score > best {
            best = score;
            best_idx = i + 1;
        }
    }

    Some(best_idx)
}

/// `ln(sum(exp(values)))` computed around the maximum to avoid overflow
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let a = max(values);
    a + sum(&exp(&subtract(values, a))).ln()
}

/// Fraction of positions where `predicted` matches `truth`
pub fn accuracy<L: PartialEq>(predicted: &[L], truth: &[L]) -> Result<f64> {
    if predicted.len() != truth.len() {
        return Err(Error::invalid_data(format!(
            "Got {} predictions for {} labels",
            predicted.len(),
            truth.len()
        )));
    }

    if truth.is_empty() {
        return Err(Error::invalid_data("Cannot score against empty labels"));
    }

    let hits = predicted
        .iter()
        .zip(truth.iter())
        .filter(|(a, b)| a == b)
        .count();

    Ok(hits as f64 / truth.len() as f64)
}

/// Validate a design matrix against its label vector
pub fn validate_training_data<M, L>(x: &M, y: ArrayView1<L>) -> Result<()>
where
    M: FeatureMatrix + ?Sized,
{
    x.check_shape()?;
    let (n, p) = x.shape();

    if n == 0 {
        return Err(Error::invalid_data("Data cannot be empty"));
    }

    if p == 0 {
        return Err(Error::invalid_data("Data must have at least one feature"));
    }

    if n != y.len() {
        return Err(Error::invalid_data(format!(
            "x has {} rows but y has {} labels",
            n,
            y.len()
        )));
    }

    Ok(())
}

/// Validate an observation vector against the number of fitted features
pub fn validate_observation(observation: ArrayView1<f64>, n_features: usize) -> Result<()> {
    if observation.len() != n_features {
        return Err(Error::invalid_data(format!(
            "Observation has {} features, model was fitted on {}",
            observation.len(),
            n_features
        )));
    }
    Ok(())
}

/// Resolve the class set for a fit, either from the labels or from an explicit list
pub fn resolve_classes<L>(y: ArrayView1<L>, explicit: Option<&[L]>) -> Result<Vec<L>>
where
    L: Clone + Eq + Hash,
{
    let Some(classes) = explicit else {
        return Ok(unique_values(y));
    };

    if classes.is_empty() {
        return Err(Error::invalid_parameter("Class set cannot be empty"));
    }

    let distinct: HashSet<&L> = classes.iter().collect();
    if distinct.len() != classes.len() {
        return Err(Error::invalid_parameter("Class set contains duplicates"));
    }

    if let Some(row) = y.iter().position(|label| !distinct.contains(label)) {
        return Err(Error::invalid_parameter(format!(
            "Label at row {} is not in the class set",
            row
        )));
    }

    Ok(classes.to_vec())
}

/// Minimum batch size before prediction fans out when `n_jobs` is unset
pub const PARALLEL_MIN_ROWS: usize = 1024;

/// Determine if batch prediction should run in parallel
pub fn should_use_parallel(n_jobs: Option<usize>, n_rows: usize) -> bool {
    match n_jobs {
        Some(1) => false,
        Some(_) => n_rows > 1,
        None => n_rows >= PARALLEL_MIN_ROWS,
    }
}
