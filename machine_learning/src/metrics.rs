use ndarray::ArrayView1;

use crate::{MlErr, Result};

/// Returns the fraction of predictions that match the true labels.
///
/// # Arguments
/// * `y_true` - The ground truth labels.
/// * `y_pred` - The predicted labels.
///
/// # Returns
/// A value in [0, 1] or an error if the inputs are empty or of different lengths.
pub fn accuracy_score(y_true: ArrayView1<usize>, y_pred: ArrayView1<usize>) -> Result<f32> {
    if y_true.len() != y_pred.len() {
        return Err(MlErr::SizeMismatch {
            what: "predictions",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }

    if y_true.is_empty() {
        return Err(MlErr::EmptyDataset);
    }

    let hits = y_true
        .iter()
        .zip(y_pred)
        .filter(|(truth, pred)| truth == pred)
        .count();

    Ok(hits as f32 / y_true.len() as f32)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn counts_matches() {
        let y_true = array![0, 1, 1, 0];
        let y_pred = array![0, 1, 0, 0];

        assert_eq!(accuracy_score(y_true.view(), y_pred.view()).unwrap(), 0.75);
        assert_eq!(accuracy_score(y_true.view(), y_true.view()).unwrap(), 1.0);
    }

    #[test]
    fn all_wrong_is_zero() {
        let y_true = array![1, 1];
        let y_pred = array![0, 0];

        assert_eq!(accuracy_score(y_true.view(), y_pred.view()).unwrap(), 0.0);
    }

    #[test]
    fn mismatched_or_empty_inputs_fail() {
        let a = array![0, 1];
        let b = array![0];
        let empty = ndarray::Array1::<usize>::zeros(0);

        assert!(accuracy_score(a.view(), b.view()).is_err());
        assert!(matches!(
            accuracy_score(empty.view(), empty.view()),
            Err(MlErr::EmptyDataset)
        ));
    }
}
