//! Gaussian naive Bayes for continuous features

use crate::classifier::{ClassPriors, NaiveBayes};
use crate::error::Result;
use crate::likelihood::GaussianDensity;
use crate::matrix::FeatureMatrix;
use crate::utils::{resolve_classes, should_use_parallel, validate_training_data};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gaussian naive Bayes estimator
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaussianNB {
    /// Per-feature log-density used when scoring
    pub density: GaussianDensity,
    /// Number of parallel jobs for batch prediction
    pub n_jobs: Option<usize>,
    /// Enable verbose output
    pub verbose: bool,
}

/// A fitted Gaussian naive Bayes model
#[derive(Debug, Clone)]
pub struct GaussianModel<L> {
    priors: ClassPriors<L>,
    /// Per-class sample mean, `mu[[feature, class]]`
    mu: Array2<f64>,
    /// Per-class sample standard deviation, `sigma[[feature, class]]`
    sigma: Array2<f64>,
    density: GaussianDensity,
    n_jobs: Option<usize>,
}

impl GaussianNB {
    /// Create a new estimator with the reference density
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-feature log-density
    pub fn density(mut self, density: GaussianDensity) -> Self {
        self.density = density;
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

    /// Fit per-class feature means and standard deviations
    pub fn fit<M, L>(&self, x: &M, y: ArrayView1<L>) -> Result<GaussianModel<L>>
    where
        M: FeatureMatrix + ?Sized,
        L: Clone + Eq + Hash,
    {
        self.fit_inner(x, y, None)
    }

    /// Fit with a fixed class set and order.
    ///
    /// Classes without training rows get a `-inf` prior and NaN parameters.
    pub fn fit_with_classes<M, L>(
        &self,
        x: &M,
        y: ArrayView1<L>,
        classes: &[L],
    ) -> Result<GaussianModel<L>>
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
    ) -> Result<GaussianModel<L>>
    where
        M: FeatureMatrix + ?Sized,
        L: Clone + Eq + Hash,
    {
        validate_training_data(x, y)?;

        let classes = resolve_classes(y, classes)?;
        let (priors, indices) = ClassPriors::fit(y, classes);
        let n_features = x.ncols();
        let mut mu = Array2::<f64>::zeros((n_features, indices.len()));
        let mut sigma = Array2::<f64>::zeros((n_features, indices.len()));

        for (class_idx, rows) in indices.iter().enumerate() {
            let block = x.mget(Some(rows.as_slice()), None);

            let class_mu = block
                .mean_axis(Axis(0))
                .unwrap_or_else(|| Array1::from_elem(n_features, f64::NAN));

            // std_axis panics when ddof exceeds the row count
            let class_sigma = if rows.len() < 2 {
                if rows.len() == 1 {
                    log::warn!(
                        "Class at index {} has a single training row; its standard deviations are NaN",
                        class_idx
                    );
                }
                Array1::from_elem(n_features, f64::NAN)
            } else {
                block.std_axis(Axis(0), 1.0)
            };

            mu.column_mut(class_idx).assign(&class_mu);
            sigma.column_mut(class_idx).assign(&class_sigma);

            log::debug!("Class {}: {} rows", class_idx, rows.len());
        }

        if self.verbose {
            log::info!(
                "Fitted Gaussian naive Bayes on {} samples, {} features, {} classes ({:?} density)",
                priors.n_samples(),
                n_features,
                priors.classes().len(),
                self.density
            );
        }

        Ok(GaussianModel {
            priors,
            mu,
            sigma,
            density: self.density,
            n_jobs: self.n_jobs,
        })
    }
}

impl<L> GaussianModel<L>
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

    /// Per-class feature means, shape `(n_features, n_classes)`
    pub fn mu(&self) -> &Array2<f64> {
        &self.mu
    }

    /// Per-class feature standard deviations, shape `(n_features, n_classes)`
    pub fn sigma(&self) -> &Array2<f64> {
        &self.sigma
    }

    /// Density used when scoring
    pub fn density(&self) -> GaussianDensity {
        self.density
    }
}

impl<L> NaiveBayes for GaussianModel<L>
where
    L: Clone + Eq + Hash + Send + Sync,
{
    type Label = L;

    fn classes(&self) -> &[L] {
        self.priors.classes()
    }

    fn n_features(&self) -> usize {
        self.mu.nrows()
    }

    fn log_likelihood(&self, observation: ArrayView1<f64>, class_idx: usize) -> f64 {
        let mu = self.mu.column(class_idx);
        let sigma = self.sigma.column(class_idx);
        let evidence: f64 = observation
            .iter()
            .zip(mu.iter().zip(sigma.iter()))
            .map(|(&value, (&m, &s))| self.density.log_density(value, m, s))
            .sum();

        self.priors.log_prior()[class_idx] + evidence
    }

    fn use_parallel(&self, n_rows: usize) -> bool {
        should_use_parallel(self.n_jobs, n_rows)
    }
}

/// Fit a Gaussian model with the reference density
pub fn fit_gaussian<M, L>(x: &M, y: ArrayView1<L>) -> Result<GaussianModel<L>>
where
    M: FeatureMatrix + ?Sized,
    L: Clone + Eq + Hash,
{
    GaussianNB::new().fit(x, y)
}
