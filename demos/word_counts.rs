//! Multinomial naive Bayes on word counts
//!
//! Fits a tiny topic classifier over a four-word vocabulary and prints
//! predictions and class probabilities for a few unseen documents.
//! Run with `RUST_LOG=debug` to see per-class fit details.

use naivebayes::{MultinomialNB, NaiveBayes, Prediction};
use ndarray::{arr1, array};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let vocabulary = ["goal", "match", "vote", "election"];

    // Word counts per document
    let x = array![
        [3.0, 2.0, 0.0, 0.0],
        [4.0, 1.0, 0.0, 1.0],
        [2.0, 3.0, 1.0, 0.0],
        [0.0, 0.0, 4.0, 3.0],
        [0.0, 1.0, 3.0, 4.0],
        [1.0, 0.0, 2.0, 5.0],
    ];
    let y = arr1(&["sports", "sports", "sports", "politics", "politics", "politics"]);

    println!("Vocabulary: {:?}", vocabulary);
    println!("Training documents: {}", x.nrows());
    println!();

    let model = MultinomialNB::new(1.0).verbose(true).fit(&x, y.view())?;

    println!("=== Fitted parameters ===");
    for (idx, class) in model.classes().iter().enumerate() {
        println!(
            "{:>8}: prior = {:.4}, P(word | class) = {:?}",
            class,
            model.priors().log_prior()[idx].exp(),
            model
                .feature_log_prob()
                .column(idx)
                .iter()
                .map(|lp| format!("{:.3}", lp.exp()))
                .collect::<Vec<_>>()
        );
    }
    println!();

    println!("=== Predictions ===");
    let unseen = array![[2.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 2.0], [1.0, 1.0, 1.0, 1.0]];

    if let Prediction::Batch(labels) = model.predict(&unseen)? {
        let probs = model.predict_probs_batch(&unseen)?;
        for (i, label) in labels.iter().enumerate() {
            println!(
                "  {:?} -> {} (probabilities {:?})",
                unseen.row(i).to_vec(),
                label,
                probs.row(i).to_vec()
            );
        }
    }
    println!();

    println!("Training accuracy: {:.2}", model.score(&x, y.view())?);

    Ok(())
}
