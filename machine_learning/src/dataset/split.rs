use log::debug;
use rand::seq::SliceRandom;

use super::Dataset;
use crate::{MlErr, Result, random::generate_rng};

/// How many samples go to the test partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitSize {
    /// A proportion of the dataset in the open interval (0, 1), rounded up.
    Fraction(f64),
    /// An exact amount of samples.
    Absolute(usize),
}

impl SplitSize {
    fn resolve(self, len: usize) -> Result<usize> {
        let n_test = match self {
            SplitSize::Fraction(fraction) => {
                if !(fraction > 0.0 && fraction < 1.0) {
                    return Err(MlErr::invalid(
                        "test_size",
                        format!("fraction must be in (0, 1), got {fraction}"),
                    ));
                }

                (fraction * len as f64).ceil() as usize
            }
            SplitSize::Absolute(n) => n,
        };

        if n_test == 0 || n_test >= len {
            return Err(MlErr::invalid(
                "test_size",
                format!(
                    "leaves {n_test} test and {} train samples out of {len}",
                    len.saturating_sub(n_test)
                ),
            ));
        }

        Ok(n_test)
    }
}

/// A train/test partition of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
}

/// Randomly partitions a dataset into a train and a test set.
///
/// A permutation of the rows is drawn, its first `test_size` rows become the test set and the
/// rest the train set.
///
/// # Arguments
/// * `dataset` - The dataset to partition.
/// * `test_size` - The size of the test partition.
/// * `seed` - The seed for the permutation, the same seed always yields the same partition.
///
/// # Returns
/// The partition or an error if any of the two sides would end up empty.
pub fn train_test_split(
    dataset: &Dataset,
    test_size: SplitSize,
    seed: Option<u64>,
) -> Result<Split> {
    let len = dataset.len();
    let n_test = test_size.resolve(len)?;

    let mut permutation: Vec<usize> = (0..len).collect();
    permutation.shuffle(&mut generate_rng(seed));
    let (test_idx, train_idx) = permutation.split_at(n_test);

    debug!("split {len} samples into {} train and {n_test} test", train_idx.len());

    Ok(Split {
        train: dataset.select(train_idx),
        test: dataset.select(test_idx),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use ndarray::{Array1, Array2};

    use super::*;

    /// A dataset whose only feature is the row index, so rows can be traced after the split.
    fn indexed(len: usize) -> Dataset {
        let x = Array2::from_shape_fn((len, 1), |(i, _)| i as f32);
        let y = Array1::from_shape_fn(len, |i| i % 2);
        Dataset::new(x, y).unwrap()
    }

    fn row_ids(ds: &Dataset) -> Vec<usize> {
        ds.x().column(0).iter().map(|&v| v as usize).collect()
    }

    #[test]
    fn fraction_is_rounded_up() {
        let split = train_test_split(&indexed(1000), SplitSize::Fraction(0.2), Some(42)).unwrap();
        assert_eq!(split.train.len(), 800);
        assert_eq!(split.test.len(), 200);

        let split = train_test_split(&indexed(11), SplitSize::Fraction(0.25), Some(42)).unwrap();
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 8);
    }

    #[test]
    fn partitions_are_disjoint_and_cover_everything() {
        let split = train_test_split(&indexed(50), SplitSize::Absolute(10), Some(7)).unwrap();

        let train: HashSet<_> = row_ids(&split.train).into_iter().collect();
        let test: HashSet<_> = row_ids(&split.test).into_iter().collect();

        assert!(train.is_disjoint(&test));
        assert_eq!(train.len() + test.len(), 50);
    }

    #[test]
    fn labels_travel_with_their_rows() {
        let split = train_test_split(&indexed(30), SplitSize::Fraction(0.3), Some(1)).unwrap();

        for side in [&split.train, &split.test] {
            for (row, &label) in row_ids(side).into_iter().zip(side.y()) {
                assert_eq!(row % 2, label);
            }
        }
    }

    #[test]
    fn same_seed_same_partition() {
        let ds = indexed(100);
        let a = train_test_split(&ds, SplitSize::Fraction(0.2), Some(42)).unwrap();
        let b = train_test_split(&ds, SplitSize::Fraction(0.2), Some(42)).unwrap();
        let c = train_test_split(&ds, SplitSize::Fraction(0.2), Some(43)).unwrap();

        assert_eq!(a, b);
        assert_ne!(row_ids(&a.test), row_ids(&c.test));
    }

    #[test]
    fn degenerate_sizes_are_rejected() {
        let ds = indexed(10);

        for size in [
            SplitSize::Fraction(0.0),
            SplitSize::Fraction(1.0),
            SplitSize::Absolute(0),
            SplitSize::Absolute(10),
        ] {
            assert!(matches!(
                train_test_split(&ds, size, None),
                Err(MlErr::InvalidParameter { name: "test_size", .. })
            ));
        }
    }
}
