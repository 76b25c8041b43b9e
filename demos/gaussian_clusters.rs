//! Gaussian naive Bayes on two separated clusters
//!
//! Compares the reference density with the textbook normal log-density.

use naivebayes::{fit_gaussian, GaussianDensity, GaussianNB, NaiveBayes};
use ndarray::{arr1, array};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let x = array![
        [0.0, 0.0],
        [1.0, 1.0],
        [0.5, 0.2],
        [7.0, 7.0],
        [13.0, 13.0],
        [10.0, 9.0],
    ];
    let y = arr1(&["low", "low", "low", "high", "high", "high"]);

    let reference = fit_gaussian(&x, y.view())?;
    let standard = GaussianNB::new()
        .density(GaussianDensity::Standard)
        .verbose(true)
        .fit(&x, y.view())?;

    println!("Means (feature x class):\n{:.3}", reference.mu());
    println!("Standard deviations (feature x class):\n{:.3}", reference.sigma());
    println!();

    for query in [arr1(&[0.5, 0.5]), arr1(&[9.5, 9.5]), arr1(&[4.0, 4.0])] {
        println!(
            "{:?}: reference -> {} {:?}, standard -> {} {:?}",
            query.to_vec(),
            reference.predict_one(query.view())?,
            reference.predict_probs_one(query.view())?.to_vec(),
            standard.predict_one(query.view())?,
            standard.predict_probs_one(query.view())?.to_vec(),
        );
    }
    println!();

    println!("Reference accuracy: {:.2}", reference.score(&x, y.view())?);
    println!("Standard accuracy:  {:.2}", standard.score(&x, y.view())?);

    Ok(())
}
