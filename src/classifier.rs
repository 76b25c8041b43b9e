//! Shared prediction contract for the naive Bayes families
//!
//! Each family only has to say how to score one observation against one class
//! ([`NaiveBayes::log_likelihood`]). Argmax prediction, log-sum-exp normalisation,
//! batch fan-out and accuracy scoring are written once here.

use crate::error::{Error, Result};
use crate::matrix::{FeatureMatrix, Observations};
use crate::utils::{accuracy, argmax, class_indices, log_sum_exp, validate_observation};
use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::*;
use std::hash::Hash;

/// Class labels seen at fit time together with their log prior probabilities
#[derive(Debug, Clone, PartialEq)]
pub struct ClassPriors<L> {
    classes: Vec<L>,
    counts: Vec<usize>,
    log_prior: Array1<f64>,
    n_samples: usize,
}

impl<L> ClassPriors<L>
where
    L: Clone + Eq + Hash,
{
    /// Count each class in `y` and return the priors along with the row indices per class
    pub(crate) fn fit(y: ArrayView1<L>, classes: Vec<L>) -> (Self, Vec<Vec<usize>>) {
        let n_samples = y.len();
        let indices = class_indices(y, &classes);
        let counts: Vec<usize> = indices.iter().map(Vec::len).collect();
        let log_prior = counts
            .iter()
            .map(|&count| (count as f64 / n_samples as f64).ln())
            .collect();

        if let Some(empty) = counts.iter().position(|&count| count == 0) {
            log::warn!(
                "Class at index {} has no training rows; its prior is -inf",
                empty
            );
        }

        let priors = Self {
            classes,
            counts,
            log_prior,
            n_samples,
        };
        (priors, indices)
    }

    /// Ordered class labels; position is the class index used everywhere else
    pub fn classes(&self) -> &[L] {
        &self.classes
    }

    /// Number of training rows per class
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// `ln(count / n)` per class index
    pub fn log_prior(&self) -> &Array1<f64> {
        &self.log_prior
    }

    /// Number of training observations
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Index of a class label
    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    /// Log prior of a class label
    pub fn prior(&self, label: &L) -> Option<f64> {
        self.index_of(label).map(|idx| self.log_prior[idx])
    }
}

/// Output of [`NaiveBayes::predict`]
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction<L> {
    /// Label for a single observation
    One(L),
    /// Labels for each row of a matrix, in row order
    Batch(Array1<L>),
}

impl<L: Clone> Prediction<L> {
    /// The single label, if this came from a single observation
    pub fn as_one(&self) -> Option<&L> {
        match self {
            Prediction::One(label) => Some(label),
            Prediction::Batch(_) => None,
        }
    }

    /// The label sequence, if this came from a matrix
    pub fn as_batch(&self) -> Option<&Array1<L>> {
        match self {
            Prediction::One(_) => None,
            Prediction::Batch(labels) => Some(labels),
        }
    }

    /// Flatten into a label vector
    pub fn into_vec(self) -> Vec<L> {
        match self {
            Prediction::One(label) => vec![label],
            Prediction::Batch(labels) => labels.to_vec(),
        }
    }
}

/// Output of [`NaiveBayes::predict_probs`]
#[derive(Debug, Clone, PartialEq)]
pub enum Probabilities {
    /// Class probabilities for a single observation
    One(Array1<f64>),
    /// One row of class probabilities per input row
    Batch(Array2<f64>),
}

impl Probabilities {
    /// The probability vector, if this came from a single observation
    pub fn as_one(&self) -> Option<&Array1<f64>> {
        match self {
            Probabilities::One(probs) => Some(probs),
            Probabilities::Batch(_) => None,
        }
    }

    /// The probability matrix, if this came from a matrix
    pub fn as_batch(&self) -> Option<&Array2<f64>> {
        match self {
            Probabilities::One(_) => None,
            Probabilities::Batch(probs) => Some(probs),
        }
    }
}

/// Behaviour shared by every fitted naive Bayes model
pub trait NaiveBayes: Sync {
    /// Class label type
    type Label: Clone + PartialEq + Send + Sync;

    /// Ordered class labels
    fn classes(&self) -> &[Self::Label];

    /// Number of features the model was fitted on
    fn n_features(&self) -> usize;

    /// Unnormalised joint log-likelihood of `observation` under class `class_idx`.
    ///
    /// The observation length has already been checked against [`Self::n_features`].
    fn log_likelihood(&self, observation: ArrayView1<f64>, class_idx: usize) -> f64;

    /// Whether batch prediction over `n_rows` rows should fan out across threads
    fn use_parallel(&self, _n_rows: usize) -> bool {
        false
    }

    /// Log-likelihood of `observation` for every class, in class order
    fn log_likelihoods(&self, observation: ArrayView1<f64>) -> Result<Array1<f64>> {
        validate_observation(observation, self.n_features())?;
        Ok((0..self.classes().len())
            .map(|class_idx| self.log_likelihood(observation, class_idx))
            .collect())
    }

    /// Most likely class for a single observation (first class wins ties)
    fn predict_one(&self, observation: ArrayView1<f64>) -> Result<Self::Label> {
        let scores = self.log_likelihoods(observation)?.to_vec();
        let best = argmax(&scores).ok_or_else(|| Error::invalid_data("Model has no classes"))?;
        Ok(self.classes()[best].clone())
    }

    /// Most likely class for each row of `x`
    fn predict_batch<M>(&self, x: &M) -> Result<Array1<Self::Label>>
    where
        M: FeatureMatrix + Sync + ?Sized,
    {
        x.check_shape()?;
        let labels = map_rows(self.use_parallel(x.nrows()), x.nrows(), |row| {
            self.predict_one(x.row(row).view())
        })?;
        Ok(Array1::from_vec(labels))
    }

    /// Dual-arity prediction: one label for a vector, a label per row for a matrix
    fn predict<'a>(&self, x: impl Into<Observations<'a>>) -> Result<Prediction<Self::Label>> {
        match x.into() {
            Observations::One(observation) => self.predict_one(observation).map(Prediction::One),
            Observations::Batch(x) => self.predict_batch(&x).map(Prediction::Batch),
        }
    }

    /// Unnormalised per-class log-likelihoods for each row, shape `(n_rows, n_classes)`
    fn predict_log_likelihoods<M>(&self, x: &M) -> Result<Array2<f64>>
    where
        M: FeatureMatrix + Sync + ?Sized,
    {
        x.check_shape()?;
        let rows = map_rows(self.use_parallel(x.nrows()), x.nrows(), |row| {
            self.log_likelihoods(x.row(row).view())
        })?;
        stack_rows(rows, self.classes().len())
    }

    /// Class probabilities for a single observation, normalised with log-sum-exp
    fn predict_probs_one(&self, observation: ArrayView1<f64>) -> Result<Array1<f64>> {
        let scores = self.log_likelihoods(observation)?;
        let log_normalizer = log_sum_exp(&scores.to_vec());
        Ok(scores.mapv(|score| (score - log_normalizer).exp()))
    }

    /// Class probabilities for each row of `x`, shape `(n_rows, n_classes)`
    fn predict_probs_batch<M>(&self, x: &M) -> Result<Array2<f64>>
    where
        M: FeatureMatrix + Sync + ?Sized,
    {
        x.check_shape()?;
        let rows = map_rows(self.use_parallel(x.nrows()), x.nrows(), |row| {
            self.predict_probs_one(x.row(row).view())
        })?;
        stack_rows(rows, self.classes().len())
    }

    /// Dual-arity probability prediction
    fn predict_probs<'a>(&self, x: impl Into<Observations<'a>>) -> Result<Probabilities> {
        match x.into() {
            Observations::One(observation) => {
                self.predict_probs_one(observation).map(Probabilities::One)
            }
            Observations::Batch(x) => self.predict_probs_batch(&x).map(Probabilities::Batch),
        }
    }

    /// Mean accuracy of the model's predictions against `y`
    fn score<'a>(&self, x: impl Into<Observations<'a>>, y: ArrayView1<Self::Label>) -> Result<f64> {
        score(self, x, y)
    }
}

/// Mean accuracy of `model` on `x` against ground truth `y`
pub fn score<'a, N>(
    model: &N,
    x: impl Into<Observations<'a>>,
    y: ArrayView1<N::Label>,
) -> Result<f64>
where
    N: NaiveBayes + ?Sized,
{
    let predicted = model.predict(x)?.into_vec();
    let truth = y.to_vec();
    accuracy(&predicted, &truth)
}

/// Apply `f` to every row index, in parallel when asked; output order follows row order
fn map_rows<T, F>(parallel: bool, n_rows: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    if parallel {
        (0..n_rows).into_par_iter().map(f).collect()
    } else {
        (0..n_rows).map(f).collect()
    }
}

fn stack_rows(rows: Vec<Array1<f64>>, n_cols: usize) -> Result<Array2<f64>> {
    let n_rows = rows.len();
    let data: Vec<f64> = rows.iter().flat_map(|row| row.iter().copied()).collect();
    Array2::from_shape_vec((n_rows, n_cols), data)
        .map_err(|e| Error::invalid_data(format!("Cannot assemble output matrix: {}", e)))
}
