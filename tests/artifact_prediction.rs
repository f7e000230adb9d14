use accident_severity::features::COLUMNS;
use accident_severity::{
    ModelArtifact, ModelLoadError, PredictError, PredictionFailure, Predictor, RawSelections,
    SeverityLabel, encode,
};
use linfa::prelude::*;
use linfa_bayes::GaussianNb;
use ndarray::{Array1, array};
use tempfile::tempdir;

fn fitted(columns: &[&str]) -> ModelArtifact {
    let x = array![
        [1., 0., 0., 1., 20., 0., 1., 0., 1.],
        [2., 0., 1., 2., 30., 1., 2., 1., 2.],
        [3., 1., 0., 1., 25., 0., 1., 0., 1.],
        [4., 0., 1., 2., 20., 1., 2., 1., 2.],
        [3., 0., 0., 4., 60., 2., 3., 1., 3.],
        [4., 1., 1., 5., 70., 3., 4., 2., 4.],
        [5., 0., 0., 4., 65., 2., 3., 1., 3.],
        [6., 1., 1., 5., 60., 3., 4., 2., 4.],
        [5., 1., 1., 8., 110., 4., 5., 2., 6.],
        [6., 1., 0., 9., 120., 5., 6., 3., 8.],
        [7., 0., 1., 10., 115., 4., 5., 2., 6.],
        [7., 1., 0., 9., 120., 5., 6., 3., 8.],
    ];
    let y = Array1::from_vec(vec![0usize, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2]);
    let classifier = GaussianNb::params()
        .fit(&Dataset::new(x, y))
        .expect("Training failed");
    ModelArtifact::new(columns.iter().copied(), classifier)
}

fn selections(day: &str, light: &str, speed_limit: u16, passengers: u8) -> RawSelections {
    RawSelections {
        day: day.to_string(),
        light: light.to_string(),
        sex_of_driver: 0,
        vehicle_type: 1,
        speed_limit,
        pedestrian_crossing: 0,
        road_type: 1,
        special_conditions: 0,
        number_of_passengers: passengers,
    }
}

#[test]
fn saved_artifact_serves_predictions_after_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accident_model.msgpack");
    fitted(&COLUMNS).save_to_file(&path).unwrap();

    let predictor = Predictor::new(ModelArtifact::load_from_file(&path).unwrap());

    let slight = encode(&selections("Monday", "Daylight", 20, 1)).unwrap();
    assert_eq!(predictor.predict(&slight).unwrap().label, SeverityLabel::Slight);

    let fatal = encode(&RawSelections {
        sex_of_driver: 0,
        vehicle_type: 9,
        pedestrian_crossing: 5,
        road_type: 6,
        special_conditions: 3,
        ..selections("Saturday", "Darkness", 120, 8)
    })
    .unwrap();
    assert_eq!(predictor.predict(&fatal).unwrap().label, SeverityLabel::Fatal);
}

#[test]
fn artifact_trained_on_other_column_order_fails_prediction() {
    let mut reordered = COLUMNS;
    reordered.swap(3, 4);
    let predictor = Predictor::new(fitted(&reordered));

    let features = encode(&selections("Friday", "Darkness", 60, 2)).unwrap();
    match predictor.predict(&features) {
        Err(PredictionFailure::Classifier(PredictError::SchemaMismatch { expected, found })) => {
            assert_eq!(expected[3], "Speed_limit");
            assert_eq!(found[3], "Vehicle_Type");
        }
        other => panic!("expected schema mismatch, got {other:?}"),
    }
}

#[test]
fn missing_artifact_is_a_load_failure() {
    let dir = tempdir().unwrap();
    let result = ModelArtifact::load_from_file(&dir.path().join("accident_model.msgpack"));
    assert!(matches!(result, Err(ModelLoadError::NotFound(_))));
}

#[test]
fn classifier_fitted_on_fewer_features_is_a_prediction_failure() {
    let x = array![
        [1., 0., 0., 1., 20., 0., 1., 0.],
        [2., 0., 1., 2., 30., 1., 2., 1.],
        [6., 1., 0., 9., 120., 5., 6., 3.],
        [7., 0., 1., 10., 115., 4., 5., 2.],
    ];
    let y = Array1::from_vec(vec![0usize, 0, 2, 2]);
    let classifier = GaussianNb::params()
        .fit(&Dataset::new(x, y))
        .expect("Training failed");
    let predictor = Predictor::new(ModelArtifact::new(COLUMNS, classifier));

    let features = encode(&selections("Friday", "Darkness", 60, 2)).unwrap();
    assert!(matches!(
        predictor.predict(&features),
        Err(PredictionFailure::Classifier(PredictError::Internal(_)))
    ));
}
