use naivebayes::{
    fit_gaussian, fit_multinomial, matrix_from_rows, score, GaussianDensity, GaussianNB,
    MultinomialNB, NaiveBayes, Prediction,
};
use ndarray::{arr1, array, Array2};

fn word_counts() -> (Array2<f64>, ndarray::Array1<&'static str>) {
    let x = array![
        [5.0, 1.0, 0.0, 0.0],
        [4.0, 2.0, 1.0, 0.0],
        [6.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 5.0, 3.0],
        [1.0, 0.0, 4.0, 4.0],
        [0.0, 2.0, 6.0, 2.0],
        [1.0, 5.0, 0.0, 0.0],
        [0.0, 6.0, 1.0, 0.0],
    ];
    let y = arr1(&[
        "sports", "sports", "sports", "politics", "politics", "politics", "tech", "tech",
    ]);
    (x, y)
}

fn blobs() -> (Array2<f64>, ndarray::Array1<i32>) {
    let x = array![
        [0.0, 0.1],
        [0.3, -0.2],
        [-0.2, 0.2],
        [0.1, 0.0],
        [5.0, 5.2],
        [5.3, 4.8],
        [4.7, 5.1],
        [5.1, 4.9],
    ];
    let y = arr1(&[0, 0, 0, 0, 1, 1, 1, 1]);
    (x, y)
}

#[test]
fn test_multinomial_end_to_end() {
    let x = matrix_from_rows(&[
        vec![2.0, 0.0],
        vec![0.0, 2.0],
        vec![3.0, 1.0],
        vec![1.0, 3.0],
    ])
    .unwrap();
    let y = arr1(&[0, 0, 1, 1]);

    let model = fit_multinomial(&x, y.view(), Some(1.0)).unwrap();

    assert_eq!(model.classes(), &[0, 1]);
    assert_eq!(model.predict(&[2.0, 0.0]).unwrap(), Prediction::One(0));
}

#[test]
fn test_gaussian_end_to_end() {
    let x = array![[0.0, 0.0], [1.0, 1.0], [7.0, 7.0], [13.0, 13.0]];
    let y = arr1(&["near", "near", "far", "far"]);

    let model = fit_gaussian(&x, y.view()).unwrap();

    assert_eq!(model.predict(&[0.5, 0.5]).unwrap(), Prediction::One("near"));
    assert_eq!(model.predict(&[9.5, 9.5]).unwrap(), Prediction::One("far"));
}

#[test]
fn test_prior_matches_class_frequency() {
    let (x, y) = word_counts();
    let multinomial = MultinomialNB::default().fit(&x, y.view()).unwrap();
    let gaussian = GaussianNB::new().fit(&x, y.view()).unwrap();

    for (label, count) in [("sports", 3.0), ("politics", 3.0), ("tech", 2.0)] {
        let expected = count / 8.0;
        assert!((multinomial.prior(&label).unwrap().exp() - expected).abs() < 1e-12);
        assert!((gaussian.prior(&label).unwrap().exp() - expected).abs() < 1e-12);
    }
}

#[test]
fn test_laplace_smoothing_keeps_probabilities_nonzero() {
    let (x, y) = word_counts();
    let model = MultinomialNB::new(1.0).fit(&x, y.view()).unwrap();

    // "tech" never uses the last word
    let tech = model.priors().index_of(&"tech").unwrap();
    let lp = model.feature_log_prob()[[3, tech]];
    assert!(lp.is_finite());
    assert!(lp.exp() > 0.0);
}

#[test]
fn test_probabilities_are_normalised() {
    let (x, y) = word_counts();
    let multinomial = MultinomialNB::default().fit(&x, y.view()).unwrap();
    let (bx, by) = blobs();
    let gaussian = GaussianNB::new().fit(&bx, by.view()).unwrap();

    for probs in [
        multinomial.predict_probs_batch(&x).unwrap(),
        gaussian.predict_probs_batch(&bx).unwrap(),
    ] {
        for row in probs.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
            assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
        }
    }
}

#[test]
fn test_predict_agrees_with_predict_probs() {
    let (x, y) = word_counts();
    let model = MultinomialNB::default().fit(&x, y.view()).unwrap();
    let queries = array![[3.0, 0.0, 0.0, 0.0], [0.0, 0.0, 2.0, 2.0], [0.0, 4.0, 0.0, 1.0]];

    let labels = model.predict_batch(&queries).unwrap();
    let probs = model.predict_probs_batch(&queries).unwrap();

    for (label, row) in labels.iter().zip(probs.rows()) {
        let mut best = 0;
        for (i, &p) in row.iter().enumerate() {
            if p > row[best] {
                best = i;
            }
        }
        assert_eq!(label, &model.classes()[best]);
    }
    assert_eq!(labels.to_vec(), vec!["sports", "politics", "tech"]);
}

#[test]
fn test_gaussian_predict_agrees_with_predict_probs() {
    let (x, y) = blobs();
    let queries = array![[0.1, 0.0], [5.0, 5.0], [2.4, 2.6], [-1.0, 6.0]];

    for density in [GaussianDensity::Reference, GaussianDensity::Standard] {
        let model = GaussianNB::new().density(density).fit(&x, y.view()).unwrap();
        let labels = model.predict_batch(&queries).unwrap();
        let probs = model.predict_probs_batch(&queries).unwrap();

        for (label, row) in labels.iter().zip(probs.rows()) {
            let mut best = 0;
            for (i, &p) in row.iter().enumerate() {
                if p > row[best] {
                    best = i;
                }
            }
            assert_eq!(label, &model.classes()[best]);
        }
    }
}

#[test]
fn test_fit_from_nested_vectors() {
    let rows = vec![
        vec![5.0, 1.0, 0.0],
        vec![4.0, 2.0, 1.0],
        vec![0.0, 1.0, 5.0],
        vec![1.0, 0.0, 4.0],
        vec![0.0, 6.0, 1.0],
    ];
    let dense = matrix_from_rows(&rows).unwrap();
    let y = arr1(&["a", "a", "b", "b", "c"]);

    let from_rows = MultinomialNB::default().fit(&rows, y.view()).unwrap();
    let from_dense = MultinomialNB::default().fit(&dense, y.view()).unwrap();
    assert_eq!(from_rows.feature_log_prob(), from_dense.feature_log_prob());
    assert_eq!(from_rows.log_priors(), from_dense.log_priors());
    assert_eq!(
        from_rows.predict_batch(&rows).unwrap(),
        from_dense.predict_batch(&dense).unwrap()
    );

    let from_rows = GaussianNB::new().fit(&rows, y.view()).unwrap();
    let from_dense = GaussianNB::new().fit(&dense, y.view()).unwrap();
    assert_eq!(from_rows.mu(), from_dense.mu());
    // "c" has a single row, so compare sigma with NaN-aware equality
    for (a, b) in from_rows.sigma().iter().zip(from_dense.sigma().iter()) {
        assert!(a == b || (a.is_nan() && b.is_nan()));
    }
    assert_eq!(from_rows.predict_probs_batch(&rows).unwrap().dim(), (5, 3));

    let ragged = vec![vec![1.0, 2.0, 3.0], vec![4.0]];
    assert!(GaussianNB::new().fit(&ragged, arr1(&[0, 1]).view()).is_err());
    assert!(from_dense.predict_batch(&ragged).is_err());
}

#[test]
fn test_tie_break_is_first_class() {
    // identical rows for both classes give identical likelihoods
    let x = array![[1.0, 1.0], [1.0, 1.0]];
    let y = arr1(&["second", "first"]);
    let model = MultinomialNB::default().fit(&x, y.view()).unwrap();

    for _ in 0..10 {
        assert_eq!(model.predict_one(arr1(&[2.0, 1.0]).view()).unwrap(), "second");
    }

    let reordered = MultinomialNB::default()
        .fit_with_classes(&x, y.view(), &["first", "second"])
        .unwrap();
    assert_eq!(reordered.predict_one(arr1(&[2.0, 1.0]).view()).unwrap(), "first");
}

#[test]
fn test_dual_arity_equivalence() {
    let (x, y) = blobs();
    let model = GaussianNB::new().fit(&x, y.view()).unwrap();

    let single_row = array![[4.9, 5.0]];
    let batch = model.predict(&single_row).unwrap();
    let one = model.predict(single_row.row(0)).unwrap();

    let batch = batch.as_batch().unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(Some(&batch[0]), one.as_one());

    let batch_probs = model.predict_probs(&single_row).unwrap();
    let one_probs = model.predict_probs(single_row.row(0)).unwrap();
    assert_eq!(
        batch_probs.as_batch().unwrap().row(0).to_vec(),
        one_probs.as_one().unwrap().to_vec()
    );
}

#[test]
fn test_score_boundaries() {
    let (x, y) = word_counts();
    let model = MultinomialNB::default().fit(&x, y.view()).unwrap();
    assert_eq!(model.score(&x, y.view()).unwrap(), 1.0);

    let wrong = y.mapv(|label| if label == "sports" { "tech" } else { "sports" });
    assert_eq!(score(&model, &x, wrong.view()).unwrap(), 0.0);

    let (bx, by) = blobs();
    let model = GaussianNB::new()
        .density(GaussianDensity::Standard)
        .fit(&bx, by.view())
        .unwrap();
    assert_eq!(model.score(&bx, by.view()).unwrap(), 1.0);
    assert_eq!(model.score(&bx, by.mapv(|c| 1 - c).view()).unwrap(), 0.0);
}

#[test]
fn test_score_single_observation() {
    let (x, y) = word_counts();
    let model = MultinomialNB::default().fit(&x, y.view()).unwrap();
    let query = arr1(&[0.0, 1.0, 4.0, 3.0]);

    assert_eq!(model.score(&query, arr1(&["politics"]).view()).unwrap(), 1.0);
    assert_eq!(score(&model, &query, arr1(&["tech"]).view()).unwrap(), 0.0);
    assert!(model.score(&query, arr1(&["politics", "tech"]).view()).is_err());
}

#[test]
fn test_reference_density_favours_values_below_the_mean() {
    // the reference score is linear in the residual, so a tight cluster far above
    // the query pulls it in; the textbook density does not
    let (x, y) = blobs();
    let query = arr1(&[0.0, 0.1]);

    let reference = GaussianNB::new().fit(&x, y.view()).unwrap();
    let standard = GaussianNB::new()
        .density(GaussianDensity::Standard)
        .fit(&x, y.view())
        .unwrap();

    assert_eq!(reference.predict_one(query.view()).unwrap(), 1);
    assert_eq!(standard.predict_one(query.view()).unwrap(), 0);
}

#[test]
fn test_score_length_mismatch() {
    let (x, y) = blobs();
    let model = GaussianNB::new().fit(&x, y.view()).unwrap();
    assert!(model.score(&x, arr1(&[0, 1]).view()).is_err());
}

#[test]
fn test_standard_density_on_blobs() {
    let (x, y) = blobs();
    let model = GaussianNB::new()
        .density(GaussianDensity::Standard)
        .fit(&x, y.view())
        .unwrap();

    assert_eq!(model.predict_one(arr1(&[0.2, 0.1]).view()).unwrap(), 0);
    assert_eq!(model.predict_one(arr1(&[5.2, 5.0]).view()).unwrap(), 1);
    assert_eq!(model.score(&x, y.view()).unwrap(), 1.0);
}

#[test]
fn test_error_conditions() {
    let (x, y) = word_counts();

    // length mismatch
    assert!(MultinomialNB::default().fit(&x, arr1(&["a"]).view()).is_err());
    assert!(GaussianNB::new().fit(&x, arr1(&["a"]).view()).is_err());

    // ragged array-of-arrays
    assert!(matrix_from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());

    // label missing from an explicit class set
    assert!(MultinomialNB::default()
        .fit_with_classes(&x, y.view(), &["sports", "politics"])
        .is_err());

    // observation width must match the fitted feature count
    let model = MultinomialNB::default().fit(&x, y.view()).unwrap();
    assert!(model.predict(&[1.0, 2.0]).is_err());
    assert!(model.predict_probs(&[1.0, 2.0]).is_err());
}
