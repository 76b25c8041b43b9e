//! # Naive Bayes Classification
//!
//! This crate provides multinomial and Gaussian naive Bayes classifiers on top of
//! ndarray. Both families fit per-class log priors plus a table of per-feature
//! parameters, and share a single prediction contract ([`NaiveBayes`]).
//!
//! ## Features
//!
//! - **Multinomial**: count features (word frequencies) with Laplace smoothing
//! - **Gaussian**: continuous features with independent per-feature normals
//! - Dual-arity prediction: a single observation or a matrix of rows
//! - Log-sum-exp normalised class probabilities
//! - Parallel batch prediction via Rayon
//!
//! ## Example
//!
//! ```rust
//! use naivebayes::{MultinomialNB, NaiveBayes};
//! use ndarray::{arr1, Array2};
//!
//! // Word counts for two documents per class
//! let x = Array2::from_shape_vec((4, 2), vec![
//!     3.0, 0.0, 4.0, 1.0, 0.0, 3.0, 1.0, 4.0,
//! ]).unwrap();
//! let y = arr1(&["spam", "spam", "ham", "ham"]);
//!
//! let model = MultinomialNB::new(1.0).fit(&x, y.view()).unwrap();
//!
//! let label = model.predict_one(arr1(&[2.0, 0.0]).view()).unwrap();
//! assert_eq!(label, "spam");
//!
//! let probs = model.predict_probs_one(arr1(&[2.0, 0.0]).view()).unwrap();
//! assert!((probs.sum() - 1.0).abs() < 1e-9);
//! ```

#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod classifier;
pub mod error;
pub mod gaussian;
pub mod likelihood;
pub mod matrix;
pub mod multinomial;
pub mod utils;

pub use classifier::{score, ClassPriors, NaiveBayes, Prediction, Probabilities};
pub use error::{Error, Result};
pub use gaussian::{fit_gaussian, GaussianModel, GaussianNB};
pub use likelihood::GaussianDensity;
pub use matrix::{matrix_from_rows, FeatureMatrix, Observations};
pub use multinomial::{fit_multinomial, MultinomialModel, MultinomialNB, DEFAULT_ALPHA};

/// Re-export commonly used types from ndarray
pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
