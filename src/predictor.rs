use crate::error::PredictionFailure;
use crate::features::FeatureVector;
use crate::model::Classifier;
use crate::severity::SeverityLabel;
use log::{debug, warn};

/// Successful outcome of a single prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub class_id: usize,
    pub label: SeverityLabel,
}

/// Runs one feature vector through an injected classifier and labels the
/// resulting class id.
pub struct Predictor<C> {
    classifier: C,
}

impl<C: Classifier> Predictor<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Predicts the severity of one request. Classifier errors come back as
    /// `PredictionFailure`; nothing is retried.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionFailure> {
        debug!("Predicting severity for {}", features);
        let ids = self
            .classifier
            .predict(&features.to_table())
            .inspect_err(|e| warn!("Prediction failed: {}", e))?;

        let class_id = *ids.first().ok_or(PredictionFailure::EmptyOutput)?;
        let label = SeverityLabel::from_class_id(class_id);
        if label == SeverityLabel::Unknown {
            warn!("Class id {} has no severity label", class_id);
        }
        debug!("Class id {} -> {}", class_id, label);

        Ok(Prediction { class_id, label })
    }
}
