//! End-to-end data transformation
//!
//! [DataTransformation](struct.DataTransformation.html) drives the whole
//! preparation run: it loads the train and test CSV files, fits the
//! [Preprocessor](crate::compose::Preprocessor) on the training split only,
//! transforms both splits with the fitted state, appends each split's target
//! as the final column, and persists the fitted preprocessor for reuse at
//! inference time. The run is a single linear pass with no retry or
//! branching; persistence is the last step, so no artifact is written when
//! any earlier step fails.

use crate::compose::{ColumnSelection, Preprocessor};
use crate::error::Result;
use crate::persistence::save_object;
use crate::table::Table;
use ndarray::{concatenate, Array2, Axis};
use std::path::{Path, PathBuf};
use tracing::info;

/// Location of the persisted preprocessing artifact.
#[derive(Clone, Debug)]
pub struct TransformationConfig {
    pub artifact_path: PathBuf,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from("artifacts").join("preprocessor.bin"),
        }
    }
}

/// The two transformed splits and the path of the persisted preprocessor.
///
/// Each matrix holds the transformed feature columns followed by the target
/// column; row counts match the input files.
#[derive(Debug)]
pub struct TransformationOutput {
    pub train: Array2<f64>,
    pub test: Array2<f64>,
    pub artifact_path: PathBuf,
}

/// Prepares train/test CSV files for model training.
#[derive(Clone, Debug, Default)]
pub struct DataTransformation {
    config: TransformationConfig,
    preprocessor: Preprocessor,
}

impl DataTransformation {
    /// Initializes a transformation with the given artifact location and
    /// preprocessor.
    pub fn new(config: TransformationConfig, preprocessor: Preprocessor) -> Self {
        Self {
            config,
            preprocessor,
        }
    }

    /// The column selection driving the run.
    pub fn columns(&self) -> &ColumnSelection {
        self.preprocessor.columns()
    }

    /// Runs the transformation: load both splits, fit on train, transform
    /// both, append targets, persist the fitted preprocessor.
    ///
    /// The test split never reaches `fit`; every statistic in the persisted
    /// artifact derives from the training file. Any failure surfaces before
    /// the artifact is written.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        train_path: P,
        test_path: Q,
    ) -> Result<TransformationOutput> {
        let train = Table::read_csv(train_path)?;
        let test = Table::read_csv(test_path)?;
        info!("read train and test data completed");

        let target_column = &self.preprocessor.columns().target_column;
        let train_target = train.numeric_column(target_column)?;
        let test_target = test.numeric_column(target_column)?;

        let fitted = self.preprocessor.fit(&train)?;
        info!("applying preprocessing object on training and testing data");
        let train_features = fitted.transform(&train)?;
        let test_features = fitted.transform(&test)?;

        let train_arr = concatenate(
            Axis(1),
            &[
                train_features.view(),
                train_target.insert_axis(Axis(1)).view(),
            ],
        )?;
        let test_arr = concatenate(
            Axis(1),
            &[
                test_features.view(),
                test_target.insert_axis(Axis(1)).view(),
            ],
        )?;

        save_object(&self.config.artifact_path, &fitted)?;
        info!(
            "saved preprocessing object to {}",
            self.config.artifact_path.display()
        );

        Ok(TransformationOutput {
            train: train_arr,
            test: test_arr,
            artifact_path: self.config.artifact_path.clone(),
        })
    }
}
