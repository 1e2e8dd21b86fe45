//! One-hot encoding of categorical columns
//!
//! [OneHotEncoder](struct.OneHotEncoder.html) learns, per column, the set of
//! distinct categories seen during fitting and maps each cell to a one-hot
//! block at transform time. Categories are kept sorted so the position of
//! every output column is reproducible across runs.

use crate::error::{Error, Result};
use linfa::Float;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Policy for categories met at transform time that were not seen during
/// fitting.
///
/// * `Error`: fail the transform. This is the default, matching the behavior
///   the encoder inherits at inference time when nothing is configured.
/// * `Ignore`: emit an all-zero block for the affected cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleUnknown {
    Error,
    Ignore,
}

impl Default for HandleUnknown {
    fn default() -> Self {
        HandleUnknown::Error
    }
}

/// Learns a per-column category vocabulary from a set of categorical columns,
/// producing a [FittedOneHotEncoder](struct.FittedOneHotEncoder.html) that
/// expands any compatible columns into one-hot blocks.
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Setter for the unknown-category policy.
    pub fn handle_unknown(mut self, policy: HandleUnknown) -> Self {
        self.handle_unknown = policy;
        self
    }

    /// Learns the sorted category vocabulary of each column.
    ///
    /// `names` labels the columns for error reporting and feature naming.
    /// Returns an error if the columns hold no rows.
    /// Panics if `names` and `columns` differ in length.
    pub fn fit(&self, names: &[String], columns: &[Vec<String>]) -> Result<FittedOneHotEncoder> {
        assert_eq!(names.len(), columns.len());
        if columns.iter().all(|c| c.is_empty()) {
            return Err(Error::NotEnoughSamples);
        }
        let categories = columns
            .iter()
            .map(|column| {
                column
                    .iter()
                    .cloned()
                    .collect::<BTreeSet<String>>()
                    .into_iter()
                    .collect::<Vec<String>>()
            })
            .collect();
        Ok(FittedOneHotEncoder {
            columns: names.to_vec(),
            categories,
            handle_unknown: self.handle_unknown,
        })
    }
}

/// The result of fitting a [one-hot encoder](struct.OneHotEncoder.html).
/// Expands categorical columns into one-hot blocks using the vocabularies
/// learned during fitting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FittedOneHotEncoder {
    columns: Vec<String>,
    categories: Vec<Vec<String>>,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    /// The sorted category vocabulary of each column, in fit order.
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }

    /// Total width of the encoded output.
    pub fn n_features_out(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// `column=category` labels for every output column, in output order.
    pub fn feature_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(self.categories.iter())
            .flat_map(|(column, categories)| {
                categories
                    .iter()
                    .map(move |category| format!("{}={}", column, category))
            })
            .collect()
    }

    /// Expands the given columns into a `(nrows, n_features_out)` matrix of
    /// zeros and ones. Cells with a category unseen during fitting follow the
    /// configured [HandleUnknown](enum.HandleUnknown.html) policy.
    ///
    /// Panics if the number of columns differs from the fitted columns.
    pub fn transform<F: Float>(&self, columns: &[Vec<String>]) -> Result<Array2<F>> {
        assert_eq!(columns.len(), self.categories.len());
        let nrows = columns.first().map(Vec::len).unwrap_or(0);
        let mut encoded = Array2::zeros((nrows, self.n_features_out()));
        let mut offset = 0;
        for ((column, categories), name) in columns
            .iter()
            .zip(self.categories.iter())
            .zip(self.columns.iter())
        {
            for (i, value) in column.iter().enumerate() {
                match categories.binary_search(value) {
                    Ok(k) => encoded[(i, offset + k)] = F::one(),
                    Err(_) => {
                        if self.handle_unknown == HandleUnknown::Error {
                            return Err(Error::UnknownCategory {
                                column: name.clone(),
                                category: value.clone(),
                            });
                        }
                    }
                }
            }
            offset += categories.len();
        }
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn names(values: &[&str]) -> Vec<String> {
        owned(values)
    }

    #[test]
    fn categories_are_sorted_per_column() {
        let encoder = OneHotEncoder::default()
            .fit(
                &names(&["color", "size"]),
                &[owned(&["red", "blue", "red"]), owned(&["s", "m", "s"])],
            )
            .unwrap();
        assert_eq!(encoder.categories()[0], vec!["blue", "red"]);
        assert_eq!(encoder.categories()[1], vec!["m", "s"]);
        assert_eq!(encoder.n_features_out(), 4);
        assert_eq!(
            encoder.feature_names(),
            vec!["color=blue", "color=red", "size=m", "size=s"]
        );
    }

    #[test]
    fn transform_produces_one_hot_blocks() {
        let encoder = OneHotEncoder::default()
            .fit(
                &names(&["color"]),
                &[owned(&["red", "blue", "green", "blue"])],
            )
            .unwrap();
        let encoded: Array2<f64> = encoder
            .transform(&[owned(&["blue", "green", "red"])])
            .unwrap();
        assert_abs_diff_eq!(
            encoded,
            array![[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]]
        );
    }

    #[test]
    fn unknown_category_is_an_error_by_default() {
        let encoder = OneHotEncoder::default()
            .fit(&names(&["color"]), &[owned(&["red", "blue"])])
            .unwrap();
        let err = encoder.transform::<f64>(&[owned(&["green"])]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown category 'green' in column 'color'".to_string()
        );
    }

    #[test]
    fn unknown_category_can_be_ignored() {
        let encoder = OneHotEncoder::default()
            .handle_unknown(HandleUnknown::Ignore)
            .fit(&names(&["color"]), &[owned(&["red", "blue"])])
            .unwrap();
        let encoded: Array2<f64> = encoder
            .transform(&[owned(&["green", "red"])])
            .unwrap();
        assert_abs_diff_eq!(encoded, array![[0., 0.], [0., 1.]]);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = OneHotEncoder::default()
            .fit(&names(&["color"]), &[owned(&[])])
            .unwrap_err();
        assert_eq!(err.to_string(), "not enough samples".to_string());
    }
}
