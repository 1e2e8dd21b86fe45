//! Standard scaling
//!
//! [StandardScaler](struct.StandardScaler.html) learns per-column means and
//! standard deviations from a dataset, producing a
//! [fitted scaler](struct.FittedStandardScaler.html) that can scale different
//! datasets using the same parameters. The no-mean variant divides by the
//! standard deviation without centering, so zero entries (one-hot output)
//! stay zero.

use crate::error::{Error, Result};
use approx::abs_diff_eq;
use linfa::dataset::{AsTargets, DatasetBase};
use linfa::traits::{Fit, Transformer};
use linfa::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};
use serde::{Deserialize, Serialize};

/// Standard scaler: learns per-column scaling parameters from a dataset,
/// producing a [fitted scaler](struct.FittedStandardScaler.html) that can be
/// used to scale different datasets using the same parameters.
///
/// ### Example
///
/// ```ignore
/// use linfa::traits::{Fit, Transformer};
/// use tabprep::scaling::StandardScaler;
///
/// // Learn scaling parameters from the training dataset
/// let scaler = StandardScaler::standard().fit(&train).unwrap();
/// // Scale both splits according to the same parameters
/// let train = scaler.transform(train);
/// let valid = scaler.transform(valid);
/// ```
#[derive(Clone, Debug)]
pub struct StandardScaler {
    with_mean: bool,
}

impl StandardScaler {
    /// Initializes a scaler that subtracts the mean of each column and scales
    /// it by the inverse of its standard deviation.
    pub fn standard() -> Self {
        Self { with_mean: true }
    }

    /// Initializes a scaler that only scales each column by the inverse of its
    /// standard deviation, leaving zero entries at zero.
    pub fn standard_no_mean() -> Self {
        Self { with_mean: false }
    }
}

impl<F: Float, D: Data<Elem = F>, T: AsTargets> Fit<ArrayBase<D, Ix2>, T, Error>
    for StandardScaler
{
    type Object = FittedStandardScaler<F>;

    /// Fits the scaler to the dataset records. Will return an error if the
    /// dataset does not contain any samples.
    fn fit(&self, x: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        FittedStandardScaler::fit(x.records(), self.with_mean)
    }
}

/// The result of fitting a [standard scaler](struct.StandardScaler.html).
/// Scales matrices with the parameters learned during fitting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FittedStandardScaler<F> {
    offsets: Array1<F>,
    scales: Array1<F>,
    with_mean: bool,
}

impl<F: Float> FittedStandardScaler<F> {
    pub(crate) fn fit<D: Data<Elem = F>>(
        records: &ArrayBase<D, Ix2>,
        with_mean: bool,
    ) -> Result<Self> {
        if records.nrows() == 0 {
            return Err(Error::NotEnoughSamples);
        }
        let offsets = records.mean_axis(Axis(0)).unwrap();
        let scales = records.std_axis(Axis(0), F::zero()).mapv(|s| {
            if abs_diff_eq!(s, F::zero()) {
                // if feature is constant then don't scale
                F::one()
            } else {
                F::one() / s
            }
        });
        Ok(Self {
            offsets,
            scales,
            with_mean,
        })
    }

    /// Array of size `n_features` that contains the mean of each column.
    pub fn offsets(&self) -> &Array1<F> {
        &self.offsets
    }

    /// Array of size `n_features` that contains the scale applied to each column.
    pub fn scales(&self) -> &Array1<F> {
        &self.scales
    }

    /// Whether the scaler subtracts the mean before scaling.
    pub fn with_mean(&self) -> bool {
        self.with_mean
    }
}

impl<F: Float> Transformer<Array2<F>, Array2<F>> for FittedStandardScaler<F> {
    /// Scales an array of size `(nsamples, nfeatures)` according to the
    /// scaler's `offsets` and `scales`. Panics if the shape of the input array
    /// is not compatible with the shape of the dataset used for fitting.
    fn transform(&self, x: Array2<F>) -> Array2<F> {
        if x.is_empty() {
            return x;
        }
        let mut x = x;
        Zip::from(x.columns_mut())
            .and(self.offsets())
            .and(self.scales())
            .for_each(|mut col, &offset, &scale| {
                if self.with_mean {
                    col.mapv_inplace(|el| (el - offset) * scale);
                } else {
                    col.mapv_inplace(|el| el * scale);
                }
            });
        x
    }
}

impl<F: Float, D: Data<Elem = F>, T: AsTargets>
    Transformer<DatasetBase<ArrayBase<D, Ix2>, T>, DatasetBase<Array2<F>, T>>
    for FittedStandardScaler<F>
{
    /// Substitutes the records of the dataset with their scaled version.
    /// Panics if the shape of the records is not compatible with the shape of
    /// the dataset used for fitting.
    fn transform(&self, x: DatasetBase<ArrayBase<D, Ix2>, T>) -> DatasetBase<Array2<F>, T> {
        let transformed_records = self.transform(x.records.to_owned());
        x.with_records(transformed_records)
    }
}
