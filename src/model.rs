use crate::error::{ModelLoadError, PredictError};
use crate::features::FeatureTable;
use linfa::prelude::*;
use linfa_bayes::GaussianNb;
use log::{debug, info};
use ndarray::{Array1, Array2};
use rmp_serde::{decode::from_read, encode::write_named};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Anything that can turn a table of feature rows into class ids, one per row.
#[cfg_attr(test, mockall::automock)]
pub trait Classifier {
    fn predict(&self, table: &FeatureTable) -> Result<Vec<usize>, PredictError>;
}

/// Serialized severity model: a Gaussian naive Bayes classifier plus the
/// column order it was fitted with.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    columns: Vec<String>,
    classifier: GaussianNb<f64, usize>,
}

impl ModelArtifact {
    /// Packages an externally fitted classifier with its training columns.
    pub fn new<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        classifier: GaussianNb<f64, usize>,
    ) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            classifier,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Saves the model to a binary `.msgpack` file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ModelLoadError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_named(&mut writer, self)?;
        writer.flush()?;
        info!("Saved model artifact to {:?}", path);
        Ok(())
    }

    /// Loads the model from a binary `.msgpack` file.
    pub fn load_from_file(path: &Path) -> Result<Self, ModelLoadError> {
        if !path.exists() {
            return Err(ModelLoadError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let artifact: Self = from_read(reader)?;
        artifact.check_width()?;
        info!(
            "Loaded model artifact from {:?} ({} columns)",
            path,
            artifact.columns.len()
        );
        Ok(artifact)
    }
}

impl ModelArtifact {
    /// Runs the classifier on `values`. ndarray panics when the row width
    /// differs from the width the classifier was fitted with; that panic
    /// comes back as `PredictError::Internal`.
    fn run_classifier(&self, values: &Array2<f64>) -> Result<Array1<usize>, PredictError> {
        panic::catch_unwind(AssertUnwindSafe(|| -> Array1<usize> {
            self.classifier.predict(values)
        }))
        .map_err(|_| {
            PredictError::Internal(format!(
                "classifier rejected a row of {} features",
                values.ncols()
            ))
        })
    }

    /// Predicts one all-zero row so a classifier fitted on a different
    /// number of features than `columns` lists is refused at load time.
    fn check_width(&self) -> Result<(), ModelLoadError> {
        let row = Array2::zeros((1, self.columns.len()));
        self.run_classifier(&row)
            .map(|_| ())
            .map_err(|e| ModelLoadError::Incompatible(e.to_string()))
    }
}

impl Classifier for ModelArtifact {
    fn predict(&self, table: &FeatureTable) -> Result<Vec<usize>, PredictError> {
        if table.columns != self.columns {
            return Err(PredictError::SchemaMismatch {
                expected: self.columns.clone(),
                found: table.columns.clone(),
            });
        }
        if table.values.ncols() != self.columns.len() {
            return Err(PredictError::ShapeMismatch {
                expected: self.columns.len(),
                found: table.values.ncols(),
            });
        }

        let ids = self.run_classifier(&table.values)?;
        debug!("Classifier produced {} class ids", ids.len());
        Ok(ids.to_vec())
    }
}
