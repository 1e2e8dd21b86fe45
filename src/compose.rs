//! Column-wise composite preprocessing
//!
//! [Preprocessor](struct.Preprocessor.html) applies two sub-pipelines to
//! disjoint column subsets of a [Table](crate::table::Table) and concatenates
//! their outputs:
//!
//! * numeric columns: median imputation, then standard scaling;
//! * categorical columns: most-frequent imputation, one-hot encoding, then
//!   scaling without centering so the encoded zeros stay zero.
//!
//! Fitting learns every statistic from the given table only; the resulting
//! [FittedPreprocessor](struct.FittedPreprocessor.html) applies them to any
//! compatible table without refitting, and is a plain record of learned
//! arrays and vocabularies that serializes with `serde`.

use crate::encoding::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder};
use crate::error::Result;
use crate::imputation::{
    FittedMedianImputer, FittedMostFrequentImputer, MedianImputer, MostFrequentImputer,
};
use crate::scaling::FittedStandardScaler;
use crate::table::Table;
use linfa::traits::Transformer;
use ndarray::{concatenate, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The column subsets a [Preprocessor](struct.Preprocessor.html) operates on.
///
/// The default selection is the exam-scores schema the crate was built
/// around; any other schema can be passed to
/// [`Preprocessor::new`](struct.Preprocessor.html#method.new) without code
/// changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub target_column: String,
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self {
            numeric_columns: vec!["writing_score".to_string(), "reading_score".to_string()],
            categorical_columns: vec![
                "gender".to_string(),
                "race_ethnicity".to_string(),
                "parental_level_of_education".to_string(),
                "lunch".to_string(),
                "test_preparation_course".to_string(),
            ],
            target_column: "math_score".to_string(),
        }
    }
}

/// Unfitted composite preprocessor over a [ColumnSelection](struct.ColumnSelection.html).
#[derive(Clone, Debug, Default)]
pub struct Preprocessor {
    columns: ColumnSelection,
    handle_unknown: HandleUnknown,
}

impl Preprocessor {
    /// Initializes a preprocessor over the given column selection.
    pub fn new(columns: ColumnSelection) -> Self {
        Self {
            columns,
            handle_unknown: HandleUnknown::default(),
        }
    }

    /// Setter for the unknown-category policy of the one-hot encoding step.
    pub fn handle_unknown(mut self, policy: HandleUnknown) -> Self {
        self.handle_unknown = policy;
        self
    }

    /// The column selection this preprocessor operates on.
    pub fn columns(&self) -> &ColumnSelection {
        &self.columns
    }

    /// Fits both sub-pipelines on the given table.
    ///
    /// Each step is fitted on the output of the previous one: the numeric
    /// scaler sees imputed values, the categorical scaler sees the one-hot
    /// encoding of imputed values. Returns an error if a selected column is
    /// absent, holds no observed values, or the table has no rows.
    pub fn fit(&self, table: &Table) -> Result<FittedPreprocessor> {
        debug!(
            "fitting preprocessor, numeric columns: {:?}, categorical columns: {:?}",
            self.columns.numeric_columns, self.columns.categorical_columns
        );

        let numeric = table.numeric_columns(&self.columns.numeric_columns)?;
        let numeric_imputer = MedianImputer::default().fit(&numeric)?;
        let imputed = numeric_imputer.transform(numeric);
        let numeric_scaler = FittedStandardScaler::fit(&imputed, true)?;

        let raw: Vec<&[Option<String>]> = self
            .columns
            .categorical_columns
            .iter()
            .map(|name| table.string_column(name))
            .collect::<Result<_>>()?;
        let categorical_imputer = MostFrequentImputer::default().fit(&raw)?;
        let filled = categorical_imputer.transform(&raw);
        let encoder = OneHotEncoder::default()
            .handle_unknown(self.handle_unknown)
            .fit(&self.columns.categorical_columns, &filled)?;
        let encoded: Array2<f64> = encoder.transform(&filled)?;
        let encoded_scaler = FittedStandardScaler::fit(&encoded, false)?;

        Ok(FittedPreprocessor {
            columns: self.columns.clone(),
            numeric_imputer,
            numeric_scaler,
            categorical_imputer,
            encoder,
            encoded_scaler,
        })
    }
}

/// The result of fitting a [Preprocessor](struct.Preprocessor.html): the
/// learned state of every step, ready to transform compatible tables and to
/// be persisted as the preprocessing artifact.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FittedPreprocessor {
    columns: ColumnSelection,
    numeric_imputer: FittedMedianImputer<f64>,
    numeric_scaler: FittedStandardScaler<f64>,
    categorical_imputer: FittedMostFrequentImputer,
    encoder: FittedOneHotEncoder,
    encoded_scaler: FittedStandardScaler<f64>,
}

impl FittedPreprocessor {
    /// The column selection the preprocessor was fitted over.
    pub fn columns(&self) -> &ColumnSelection {
        &self.columns
    }

    /// The fitted numeric imputation step.
    pub fn numeric_imputer(&self) -> &FittedMedianImputer<f64> {
        &self.numeric_imputer
    }

    /// The fitted numeric scaling step.
    pub fn numeric_scaler(&self) -> &FittedStandardScaler<f64> {
        &self.numeric_scaler
    }

    /// The fitted categorical imputation step.
    pub fn categorical_imputer(&self) -> &FittedMostFrequentImputer {
        &self.categorical_imputer
    }

    /// The fitted one-hot encoding step.
    pub fn encoder(&self) -> &FittedOneHotEncoder {
        &self.encoder
    }

    /// Width of the transformed output: numeric columns plus one-hot columns.
    pub fn n_features_out(&self) -> usize {
        self.columns.numeric_columns.len() + self.encoder.n_features_out()
    }

    /// Applies the fitted steps to the selected columns of the given table,
    /// returning a `(nrows, n_features_out)` matrix with the numeric block
    /// first. The fitted state is never modified.
    pub fn transform(&self, table: &Table) -> Result<Array2<f64>> {
        let numeric = table.numeric_columns(&self.columns.numeric_columns)?;
        let numeric = self
            .numeric_scaler
            .transform(self.numeric_imputer.transform(numeric));

        let raw: Vec<&[Option<String>]> = self
            .columns
            .categorical_columns
            .iter()
            .map(|name| table.string_column(name))
            .collect::<Result<_>>()?;
        let filled = self.categorical_imputer.transform(&raw);
        let encoded = self
            .encoded_scaler
            .transform(self.encoder.transform::<f64>(&filled)?);

        Ok(concatenate(Axis(1), &[numeric.view(), encoded.view()])?)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::io::Cursor;

    fn selection() -> ColumnSelection {
        ColumnSelection {
            numeric_columns: vec!["score".to_string()],
            categorical_columns: vec!["grade".to_string()],
            target_column: "outcome".to_string(),
        }
    }

    fn table(data: &str) -> Table {
        Table::from_reader(Cursor::new(data)).unwrap()
    }

    #[test]
    fn default_selection_is_the_exam_schema() {
        let columns = ColumnSelection::default();
        assert_eq!(columns.numeric_columns.len(), 2);
        assert_eq!(columns.categorical_columns.len(), 5);
        assert_eq!(columns.target_column, "math_score");
    }

    #[test]
    fn fit_transform_shapes_and_values() {
        let train = table("score,grade,outcome\n1.0,a,10\n3.0,b,20\n,a,30\n");
        let fitted = Preprocessor::new(selection()).fit(&train).unwrap();
        // median of [1, 3] fills the missing cell
        assert_abs_diff_eq!(*fitted.numeric_imputer().statistics(), array![2.]);
        assert_eq!(fitted.n_features_out(), 3);

        let transformed = fitted.transform(&train).unwrap();
        assert_eq!(transformed.dim(), (3, 3));
        // numeric block is standardized: zero mean, unit variance
        let numeric = transformed.column(0);
        assert_abs_diff_eq!(numeric.sum(), 0.);
        // the one-hot blocks keep their zeros after scaling
        assert_abs_diff_eq!(transformed[(0, 2)], 0.);
        assert_abs_diff_eq!(transformed[(1, 1)], 0.);
    }

    #[test]
    fn transform_uses_train_statistics_only() {
        let train = table("score,grade,outcome\n1.0,a,10\n3.0,b,20\n");
        let test = table("score,grade,outcome\n,a,30\n");
        let fitted = Preprocessor::new(selection()).fit(&train).unwrap();
        let statistics = fitted.numeric_imputer().statistics().clone();

        let transformed = fitted.transform(&test).unwrap();
        assert_eq!(transformed.dim(), (1, 3));
        // the missing test cell was filled with the train median (2.0), then
        // standardized with the train mean/std: (2 - 2) / 1 = 0
        assert_abs_diff_eq!(transformed[(0, 0)], 0.);
        // transforming did not touch the fitted state
        assert_abs_diff_eq!(*fitted.numeric_imputer().statistics(), statistics);
    }

    #[test]
    fn missing_selected_column_is_an_error() {
        let train = table("score,outcome\n1.0,10\n");
        let err = Preprocessor::new(selection()).fit(&train).unwrap_err();
        assert_eq!(
            err.to_string(),
            "column 'grade' not found in the input data".to_string()
        );
    }

    #[test]
    fn unknown_category_follows_the_configured_policy() {
        let train = table("score,grade,outcome\n1.0,a,10\n3.0,b,20\n");
        let test = table("score,grade,outcome\n2.0,c,30\n");

        let fitted = Preprocessor::new(selection()).fit(&train).unwrap();
        assert!(fitted.transform(&test).is_err());

        let fitted = Preprocessor::new(selection())
            .handle_unknown(HandleUnknown::Ignore)
            .fit(&train)
            .unwrap();
        let transformed = fitted.transform(&test).unwrap();
        // unseen category encodes as an all-zero block
        assert_abs_diff_eq!(transformed[(0, 1)], 0.);
        assert_abs_diff_eq!(transformed[(0, 2)], 0.);
    }

    #[test]
    fn empty_table_is_an_error() {
        let train = table("score,grade,outcome\n");
        let err = Preprocessor::new(selection()).fit(&train).unwrap_err();
        assert_eq!(err.to_string(), "not enough samples".to_string());
    }
}
