//! Multinomial naive Bayes for count-valued features

use crate::classifier::{ClassPriors, NaiveBayes};
use crate::error::{Error, Result};
use crate::likelihood::{multinomial_log_prob, multinomial_term};
use crate::matrix::FeatureMatrix;
use crate::utils::{resolve_classes, should_use_parallel, validate_training_data};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default Laplace smoothing constant
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Multinomial naive Bayes estimator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultinomialNB {
    /// Additive (Laplace) smoothing constant, strictly positive
    pub alpha: f64,
    /// Number of parallel jobs for batch prediction
    pub n_jobs: Option<usize>,
    /// Enable verbose output
    pub verbose: bool,
}

/// A fitted multinomial naive Bayes model
#[derive(Debug, Clone)]
pub struct MultinomialModel<L> {
    priors: ClassPriors<L>,
    /// `cprob[[feature, class]]`
    feature_log_prob: Array2<f64>,
    alpha: f64,
    n_jobs: Option<usize>,
}

impl Default for MultinomialNB {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            n_jobs: None,
            verbose: false,
        }
    }
}

impl MultinomialNB {
    /// Create a new estimator with the given smoothing constant
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            ..Default::default()
        }
    }

    /// Set the smoothing constant
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the number of parallel jobs
    pub fn n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = Some(n_jobs);
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Fit the model on count matrix `x` and labels `y`.
    ///
    /// Classes are taken from `y` in order of first occurrence.
    pub fn fit<M, L>(&self, x: &M, y: ArrayView1<L>) -> Result<MultinomialModel<L>>
    where
        M: FeatureMatrix + ?Sized,
        L: Clone + Eq + Hash,
    {
        self.fit_inner(x, y, None)
    }

    /// Fit the model with a fixed class set and order.
    ///
    /// Classes without training rows are kept with a `-inf` prior.
    pub fn fit_with_classes<M, L>(
        &self,
        x: &M,
        y: ArrayView1<L>,
        classes: &[L],
    ) -> Result<MultinomialModel<L>>
    where
        M: FeatureMatrix + ?Sized,
        L: Clone + Eq + Hash,
    {
        self.fit_inner(x, y, Some(classes))
    }

    /// Fit the model and predict the training rows
    pub fn fit_predict<M, L>(&self, x: &M, y: ArrayView1<L>) -> Result<Array1<L>>
    where
        M: FeatureMatrix + Sync + ?Sized,
        L: Clone + Eq + Hash + Send + Sync,
    {
        self.fit(x, y)?.predict_batch(x)
    }

    fn fit_inner<M, L>(
        &self,
        x: &M,
        y: ArrayView1<L>,
        classes: Option<&[L]>,
    ) -> Result<MultinomialModel<L>>
    where
        M: FeatureMatrix + ?Sized,
        L: Clone + Eq + Hash,
    {
        self.validate_input(x, y)?;

        let classes = resolve_classes(y, classes)?;
        let (priors, indices) = ClassPriors::fit(y, classes);
        let n_features = x.ncols();
        let mut feature_log_prob = Array2::zeros((n_features, indices.len()));

        for (class_idx, rows) in indices.iter().enumerate() {
            let counts = x.mget(Some(rows.as_slice()), None).sum_axis(Axis(0));
            let total = counts.sum();

            for (feature_idx, &count) in counts.iter().enumerate() {
                feature_log_prob[[feature_idx, class_idx]] =
                    multinomial_log_prob(count, total, self.alpha, n_features);
            }

            log::debug!(
                "Class {}: {} rows, total count {}",
                class_idx,
                rows.len(),
                total
            );
        }

        if self.verbose {
            log::info!(
                "Fitted multinomial naive Bayes on {} samples, {} features, {} classes (alpha = {})",
                priors.n_samples(),
                n_features,
                priors.classes().len(),
                self.alpha
            );
        }

        Ok(MultinomialModel {
            priors,
            feature_log_prob,
            alpha: self.alpha,
            n_jobs: self.n_jobs,
        })
    }

    /// Validate input parameters and data
    fn validate_input<M, L>(&self, x: &M, y: ArrayView1<L>) -> Result<()>
    where
        M: FeatureMatrix + ?Sized,
    {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(Error::invalid_parameter(format!(
                "alpha must be a finite number > 0, got {}",
                self.alpha
            )));
        }

        validate_training_data(x, y)
    }
}

impl<L> MultinomialModel<L>
where
    L: Clone + Eq + Hash,
{
    /// Class labels and priors
    pub fn priors(&self) -> &ClassPriors<L> {
        &self.priors
    }

    /// Log prior of a class label
    pub fn prior(&self, label: &L) -> Option<f64> {
        self.priors.prior(label)
    }

    /// Number of training observations
    pub fn n_samples(&self) -> usize {
        self.priors.n_samples()
    }

    /// Number of training rows per class, in class order
    pub fn class_counts(&self) -> &[usize] {
        self.priors.counts()
    }

    /// Log prior per class, in class order
    pub fn log_priors(&self) -> &Array1<f64> {
        self.priors.log_prior()
    }

    /// Log conditional feature probabilities, shape `(n_features, n_classes)`
    pub fn feature_log_prob(&self) -> &Array2<f64> {
        &self.feature_log_prob
    }

    /// Smoothing constant used at fit time
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl<L> NaiveBayes for MultinomialModel<L>
where
    L: Clone + Eq + Hash + Send + Sync,
{
    type Label = L;

    fn classes(&self) -> &[L] {
        self.priors.classes()
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob.nrows()
    }

    fn log_likelihood(&self, observation: ArrayView1<f64>, class_idx: usize) -> f64 {
        let cprob = self.feature_log_prob.column(class_idx);
        let evidence: f64 = observation
            .iter()
            .zip(cprob.iter())
            .map(|(&value, &log_prob)| multinomial_term(value, log_prob))
            .sum();

        self.priors.log_prior()[class_idx] + evidence
    }

    fn use_parallel(&self, n_rows: usize) -> bool {
        should_use_parallel(self.n_jobs, n_rows)
    }
}

/// Fit a multinomial model; `alpha` defaults to [`DEFAULT_ALPHA`]
pub fn fit_multinomial<M, L>(
    x: &M,
    y: ArrayView1<L>,
    alpha: Option<f64>,
) -> Result<MultinomialModel<L>>
where
    M: FeatureMatrix + ?Sized,
    L: Clone + Eq + Hash,
{
    MultinomialNB::new(alpha.unwrap_or(DEFAULT_ALPHA)).fit(x, y)
}
