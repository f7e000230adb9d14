//! # accident-severity 🚗
//!
//! Predict how severe a road accident could be from a handful of real-world
//! factors, using a pre-trained Gaussian Naive Bayes classifier.
//!
//! The model is fitted elsewhere and shipped as a MessagePack artifact
//! ([`rmp-serde`](https://crates.io/crates/rmp-serde)) holding a
//! [`linfa-bayes`](https://crates.io/crates/linfa-bayes) classifier and the
//! column order it was trained with. This crate encodes user selections into
//! that fixed nine-column feature vector, runs the prediction and labels the
//! resulting class id.
//!
//! ## Features
//! - Weekday and light-condition encoding with explicit enums
//! - Injectable [`Classifier`] seam, stubbed in tests with `mockall`
//! - Column-order check against the trained artifact
//! - Tagged prediction result (`Prediction` / `PredictionFailure`)
//! - Text insights over the accident CSV
//! - Interactive terminal session and one-shot CLI
//!
//! ## Example
//! ```rust,no_run
//! use std::path::Path;
//! use accident_severity::{ModelArtifact, Predictor, RawSelections, encode};
//!
//! let model = ModelArtifact::load_from_file(Path::new("accident_model.msgpack"))?;
//! let predictor = Predictor::new(model);
//! let features = encode(&RawSelections {
//!     day: "Friday".into(),
//!     light: "Darkness".into(),
//!     sex_of_driver: 1,
//!     vehicle_type: 3,
//!     speed_limit: 60,
//!     pedestrian_crossing: 2,
//!     road_type: 4,
//!     special_conditions: 1,
//!     number_of_passengers: 2,
//! })?;
//! match predictor.predict(&features) {
//!     Ok(prediction) => println!("Severity: {} {}", prediction.label, prediction.label.icon()),
//!     Err(e) => println!("Prediction failed: {e}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Configuration management
pub mod config;

/// Error types
pub mod error;

/// Feature vector encoding
pub mod features;

/// Dataset summaries
pub mod insights;

/// Classifier seam and the serialized model artifact
pub mod model;

/// Prediction adapter
pub mod predictor;

/// Interactive terminal session
pub mod session;

/// Severity labels
pub mod severity;

pub use config::Config;
pub use error::{ConfigError, DatasetError, EncodeError, ModelLoadError, PredictError, PredictionFailure};
pub use features::{FeatureTable, FeatureVector, LightCondition, RawSelections, Weekday, encode};
pub use insights::Insights;
pub use model::{Classifier, ModelArtifact};
pub use predictor::{Prediction, Predictor};
pub use session::Session;
pub use severity::SeverityLabel;
