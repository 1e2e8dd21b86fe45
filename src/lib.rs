//! # Tabular data preparation for regression models
//!
//! `tabprep` turns a pair of raw train/test CSV files into numeric matrices
//! ready for model training, and persists the fitted preprocessing state for
//! reuse at inference time. It builds on the [`linfa`](https://crates.io/crates/linfa)
//! fit/transform conventions: every step is an unfitted builder that `fit`s
//! into an explicit, serializable fitted struct.
//!
//! ## Current state
//!
//! The crate provides:
//!
//! * a mixed-type [`Table`](table/struct.Table.html) loaded from CSV, keeping
//!   missing cells distinguishable;
//! * median and most-frequent [imputation](imputation/index.html);
//! * sorted-vocabulary [one-hot encoding](encoding/index.html) with a
//!   configurable unknown-category policy;
//! * [standard scaling](scaling/index.html) with and without centering;
//! * a two-branch [composite preprocessor](compose/index.html) over an
//!   explicit column selection;
//! * binary [persistence](persistence/index.html) of fitted state and an
//!   end-to-end [transformation run](transformation/index.html).
//!
//! ## Example
//!
//! ```ignore
//! use tabprep::{DataTransformation, Preprocessor, TransformationConfig};
//!
//! let transformation = DataTransformation::new(
//!     TransformationConfig::default(),
//!     Preprocessor::default(),
//! );
//! let output = transformation.run("data/train.csv", "data/test.csv")?;
//! // output.train / output.test hold the transformed features with the
//! // target appended; output.artifact_path points at the saved preprocessor.
//! ```

pub mod compose;
pub mod encoding;
pub mod error;
pub mod imputation;
pub mod persistence;
pub mod scaling;
pub mod table;
pub mod transformation;

pub use crate::compose::{ColumnSelection, FittedPreprocessor, Preprocessor};
pub use crate::encoding::HandleUnknown;
pub use crate::error::{Error, Result};
pub use crate::table::Table;
pub use crate::transformation::{DataTransformation, TransformationConfig, TransformationOutput};
