//! Missing-value imputation
//!
//! Two imputers cover the two column kinds: [MedianImputer](struct.MedianImputer.html)
//! fills `NaN` entries of a numeric matrix with the per-column median learned at
//! fit time, [MostFrequentImputer](struct.MostFrequentImputer.html) fills missing
//! cells of categorical columns with the per-column most frequent value.

use crate::error::{Error, Result};
use linfa::traits::Transformer;
use linfa::Float;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix2, Zip};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Learns per-column medians from the observed (non-`NaN`) values of a numeric
/// matrix, producing a [FittedMedianImputer](struct.FittedMedianImputer.html)
/// that fills missing entries of any matrix with the same statistics.
#[derive(Clone, Debug, Default)]
pub struct MedianImputer;

impl MedianImputer {
    /// Learns the per-column median of the observed values.
    ///
    /// Returns an error if the matrix has no rows, or if a column holds no
    /// observed value at all.
    pub fn fit<F: Float, D: Data<Elem = F>>(
        &self,
        x: &ArrayBase<D, Ix2>,
    ) -> Result<FittedMedianImputer<F>> {
        if x.nrows() == 0 {
            return Err(Error::NotEnoughSamples);
        }
        let mut statistics = Array1::zeros(x.ncols());
        for (j, column) in x.columns().into_iter().enumerate() {
            let mut observed: Vec<F> = column.iter().copied().filter(|v| !v.is_nan()).collect();
            if observed.is_empty() {
                return Err(Error::EmptyColumn(j));
            }
            observed.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let mid = observed.len() / 2;
            statistics[j] = if observed.len() % 2 == 0 {
                (observed[mid - 1] + observed[mid]) / F::cast(2.)
            } else {
                observed[mid]
            };
        }
        Ok(FittedMedianImputer { statistics })
    }
}

/// The result of fitting a [median imputer](struct.MedianImputer.html).
/// Fills `NaN` entries with the medians learned during fitting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FittedMedianImputer<F> {
    statistics: Array1<F>,
}

impl<F: Float> FittedMedianImputer<F> {
    /// Array of size `n_features` holding the fill value of each column.
    pub fn statistics(&self) -> &Array1<F> {
        &self.statistics
    }
}

impl<F: Float> Transformer<Array2<F>, Array2<F>> for FittedMedianImputer<F> {
    /// Replaces every `NaN` entry with the fill value of its column.
    /// Panics if the number of columns differs from the fitted matrix.
    fn transform(&self, x: Array2<F>) -> Array2<F> {
        if x.is_empty() {
            return x;
        }
        let mut x = x;
        Zip::from(x.columns_mut())
            .and(&self.statistics)
            .for_each(|mut column, &statistic| {
                column.mapv_inplace(|el| if el.is_nan() { statistic } else { el });
            });
        x
    }
}

/// Learns the per-column most frequent value of categorical columns, producing
/// a [FittedMostFrequentImputer](struct.FittedMostFrequentImputer.html) that
/// fills missing cells with the same values.
#[derive(Clone, Debug, Default)]
pub struct MostFrequentImputer;

impl MostFrequentImputer {
    /// Learns the most frequent observed value of each column. Frequency ties
    /// resolve to the lexicographically smallest candidate, so fitting is
    /// deterministic.
    ///
    /// Returns an error if the columns have no rows, or if a column holds no
    /// observed value at all.
    pub fn fit(&self, columns: &[&[Option<String>]]) -> Result<FittedMostFrequentImputer> {
        if columns.iter().all(|c| c.is_empty()) {
            return Err(Error::NotEnoughSamples);
        }
        let mut fill_values = Vec::with_capacity(columns.len());
        for (j, column) in columns.iter().enumerate() {
            let mut counts: BTreeMap<&String, usize> = BTreeMap::new();
            for value in column.iter().flatten() {
                *counts.entry(value).or_insert(0) += 1;
            }
            let best = counts
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(value, _)| (*value).clone())
                .ok_or(Error::EmptyColumn(j))?;
            fill_values.push(best);
        }
        Ok(FittedMostFrequentImputer { fill_values })
    }
}

/// The result of fitting a [most-frequent imputer](struct.MostFrequentImputer.html).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FittedMostFrequentImputer {
    fill_values: Vec<String>,
}

impl FittedMostFrequentImputer {
    /// The fill value of each column, in fit order.
    pub fn fill_values(&self) -> &[String] {
        &self.fill_values
    }

    /// Fills missing cells with the value learned for their column.
    /// Panics if the number of columns differs from the fitted columns.
    pub fn transform(&self, columns: &[&[Option<String>]]) -> Vec<Vec<String>> {
        assert_eq!(columns.len(), self.fill_values.len());
        columns
            .iter()
            .zip(self.fill_values.iter())
            .map(|(column, fill)| {
                column
                    .iter()
                    .map(|cell| cell.clone().unwrap_or_else(|| fill.clone()))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn median_of_odd_and_even_columns() {
        let x = array![[1., 10.], [3., 20.], [2., f64::NAN]];
        let imputer = MedianImputer::default().fit(&x).unwrap();
        // col 0: median of [1, 2, 3]; col 1: mean of the two middle values
        assert_abs_diff_eq!(*imputer.statistics(), array![2., 15.]);
    }

    #[test]
    fn transform_fills_only_missing_entries() {
        let train = array![[1., 4.], [f64::NAN, 6.], [3., f64::NAN]];
        let imputer = MedianImputer::default().fit(&train).unwrap();
        let filled = imputer.transform(train);
        assert_abs_diff_eq!(filled, array![[1., 4.], [2., 6.], [3., 5.]]);
    }

    #[test]
    fn statistics_come_from_the_fitted_split_only() {
        let train = array![[1.], [2.], [3.]];
        let imputer = MedianImputer::default().fit(&train).unwrap();
        let test = array![[100.], [f64::NAN], [300.]];
        let filled = imputer.transform(test);
        assert_abs_diff_eq!(filled[(1, 0)], 2.);
        assert_abs_diff_eq!(*imputer.statistics(), array![2.]);
    }

    #[test]
    fn all_missing_column_is_an_error() {
        let x = array![[1., f64::NAN], [2., f64::NAN]];
        let err = MedianImputer::default().fit(&x).unwrap_err();
        assert_eq!(
            err.to_string(),
            "column 1 has no observed values to impute from".to_string()
        );
    }

    #[test]
    fn empty_input_is_an_error() {
        let x = ndarray::Array2::<f64>::zeros((0, 2));
        let err = MedianImputer::default().fit(&x).unwrap_err();
        assert_eq!(err.to_string(), "not enough samples".to_string());
    }

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn most_frequent_value_wins() {
        let column = cells(&[Some("b"), Some("a"), Some("b"), None]);
        let imputer = MostFrequentImputer::default().fit(&[&column]).unwrap();
        assert_eq!(imputer.fill_values(), &["b"]);
        let filled = imputer.transform(&[&column]);
        assert_eq!(filled[0], vec!["b", "a", "b", "b"]);
    }

    #[test]
    fn frequency_ties_pick_the_smallest_value() {
        let column = cells(&[Some("b"), Some("a"), None]);
        let imputer = MostFrequentImputer::default().fit(&[&column]).unwrap();
        assert_eq!(imputer.fill_values(), &["a"]);
    }

    #[test]
    fn all_missing_categorical_column_is_an_error() {
        let column = cells(&[None, None]);
        let err = MostFrequentImputer::default().fit(&[&column]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "column 0 has no observed values to impute from".to_string()
        );
    }
}
