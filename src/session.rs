//! Terminal prompt loop standing in for the form controls: two dropdowns,
//! numeric inputs and the speed limit slider.

use crate::error::{ModelLoadError, PredictionFailure};
use crate::features::{
    FieldRange, LightCondition, NUMBER_OF_PASSENGERS, PEDESTRIAN_CROSSING, ROAD_TYPE,
    RawSelections, SEX_OF_DRIVER, SPECIAL_CONDITIONS, SPEED_LIMIT, VEHICLE_TYPE, Weekday, encode,
};
use crate::insights::Insights;
use crate::model::Classifier;
use crate::predictor::{Prediction, Predictor};
use log::{debug, warn};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Message shown when the model cannot be loaded; no prediction is served
/// after it.
pub fn model_load_message(path: &Path, err: &ModelLoadError) -> String {
    match err {
        ModelLoadError::NotFound(_) => format!(
            "❌ Model file not found! Please make sure '{}' exists.",
            path.display()
        ),
        e => format!("❌ Failed to load model: {}", e),
    }
}

/// The insights report, or a warning when the dataset is unavailable.
pub fn insights_section(path: &Path) -> String {
    match Insights::from_csv(path) {
        Ok(insights) => insights.render(),
        Err(e) => {
            warn!("Dataset unavailable: {}", e);
            format!(
                "⚠️ Dataset not found or invalid for plotting. Please ensure '{}' exists.",
                path.display()
            )
        }
    }
}

/// Formats a prediction outcome the way the session prints it.
pub fn render_outcome(outcome: &Result<Prediction, PredictionFailure>) -> String {
    match outcome {
        Ok(prediction) => format!(
            "Predicted Accident Severity: {} {}\n🖼️  {}\n✅ Prediction Complete!",
            prediction.label.name().to_uppercase(),
            prediction.label.icon(),
            prediction.label.image_url()
        ),
        Err(e) => format!("⚠️ Prediction failed: {}", e),
    }
}

pub struct Session<R, W> {
    input: R,
    output: W,
    speed_limit: FieldRange,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, default_speed_limit: u16) -> Self {
        Self {
            input,
            output,
            speed_limit: SPEED_LIMIT.with_default(default_speed_limit),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next trimmed line, or `None` on end of input or `exit`.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }

    /// Dropdown: accepts an option name or its 1-based position; an empty
    /// line picks the first option.
    fn choose(&mut self, label: &str, options: &[&'static str]) -> io::Result<Option<String>> {
        loop {
            write!(self.output, "{} [{}]: ", label, options.join("/"))?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            let picked = if line.is_empty() {
                options.first().copied()
            } else if let Ok(n) = line.parse::<usize>() {
                n.checked_sub(1).and_then(|i| options.get(i).copied())
            } else {
                options
                    .iter()
                    .copied()
                    .find(|o| o.eq_ignore_ascii_case(&line))
            };

            match picked {
                Some(option) => return Ok(Some(option.to_string())),
                None => writeln!(self.output, "Please choose one of: {}", options.join(", "))?,
            }
        }
    }

    /// Numeric input constrained to `range`; an empty line takes the default.
    fn number(&mut self, label: &str, range: FieldRange) -> io::Result<Option<u16>> {
        loop {
            write!(
                self.output,
                "{} [{}-{}, default {}]: ",
                label, range.min, range.max, range.default
            )?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if line.is_empty() {
                return Ok(Some(range.default));
            }
            match line.parse::<u16>() {
                Ok(value) if range.contains(value) => return Ok(Some(value)),
                _ => writeln!(
                    self.output,
                    "Please enter a whole number between {} and {}",
                    range.min, range.max
                )?,
            }
        }
    }

    /// Prompts for all nine inputs. `None` means the user left.
    pub fn collect(&mut self) -> io::Result<Option<RawSelections>> {
        let days = Weekday::ALL.map(Weekday::name);
        let lights = LightCondition::ALL.map(LightCondition::name);

        let Some(day) = self.choose("Day of Week", &days)? else {
            return Ok(None);
        };
        let Some(light) = self.choose("Light Conditions", &lights)? else {
            return Ok(None);
        };
        let Some(sex) = self.number("Sex of Driver (0=Male, 1=Female)", SEX_OF_DRIVER)? else {
            return Ok(None);
        };
        let Some(vehicle) = self.number("Vehicle Type", VEHICLE_TYPE)? else {
            return Ok(None);
        };
        let Some(speed) = self.number("Speed Limit (km/h)", self.speed_limit)? else {
            return Ok(None);
        };
        let Some(pedestrian) = self.number("Pedestrian Crossing", PEDESTRIAN_CROSSING)? else {
            return Ok(None);
        };
        let Some(road) = self.number("Road Type", ROAD_TYPE)? else {
            return Ok(None);
        };
        let Some(special) = self.number("Special Conditions", SPECIAL_CONDITIONS)? else {
            return Ok(None);
        };
        let Some(passengers) = self.number("Number of Passengers", NUMBER_OF_PASSENGERS)? else {
            return Ok(None);
        };

        // All ranges except the speed limit fit in a u8.
        Ok(Some(RawSelections {
            day,
            light,
            sex_of_driver: sex as u8,
            vehicle_type: vehicle as u8,
            speed_limit: speed,
            pedestrian_crossing: pedestrian as u8,
            road_type: road as u8,
            special_conditions: special as u8,
            number_of_passengers: passengers as u8,
        }))
    }

    /// Runs prompt → encode → predict until the user exits. Returns the
    /// number of successful predictions.
    pub fn run<C: Classifier>(&mut self, predictor: &Predictor<C>) -> io::Result<usize> {
        let mut served = 0;
        loop {
            writeln!(self.output, "\n🧠 Enter Accident Details (or 'exit')")?;
            let Some(raw) = self.collect()? else {
                break;
            };

            let features = match encode(&raw) {
                Ok(features) => features,
                Err(e) => {
                    warn!("Rejected selections: {}", e);
                    writeln!(self.output, "⚠️ {}", e)?;
                    continue;
                }
            };

            let outcome = predictor.predict(&features);
            if outcome.is_ok() {
                served += 1;
            }
            writeln!(self.output, "{}", render_outcome(&outcome))?;
        }
        debug!("Session ended after {} predictions", served);
        Ok(served)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictError;
    use crate::model::MockClassifier;
    use crate::severity::SeverityLabel;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn session(input: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), 40)
    }

    fn output(session: Session<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn predicts_reference_example() {
        let mut classifier = MockClassifier::new();
        classifier
            .expect_predict()
            .withf(|table| {
                table.values.row(0).to_vec() == vec![5.0, 1.0, 1.0, 3.0, 60.0, 2.0, 4.0, 1.0, 2.0]
            })
            .times(1)
            .returning(|_| Ok(vec![2]));
        let predictor = Predictor::new(classifier);

        let mut session = session("Friday\nDarkness\n1\n3\n60\n2\n4\n1\n2\nexit\n");
        assert_eq!(session.run(&predictor).unwrap(), 1);

        let text = output(session);
        assert!(text.contains("Predicted Accident Severity: FATAL 🚨"));
        assert!(text.contains("✅ Prediction Complete!"));
    }

    #[test]
    fn empty_lines_select_defaults() {
        let mut session = session("\n\n\n\n\n\n\n\n\n");
        let raw = session.collect().unwrap().unwrap();
        let vector = encode(&raw).unwrap();
        assert_eq!(vector.to_string(), "(1, 0, 0, 0, 40, 0, 1, 0, 1)");
    }

    #[test]
    fn invalid_answers_prompt_again() {
        let mut session = session("Funday\n5\nDusk\ndarkness\n2\n1\n11\n10\n200\n19\n120\n0\n0\n1\n0\n1\n");
        let raw = session.collect().unwrap().unwrap();
        assert_eq!(raw.day, "Friday");
        assert_eq!(raw.light, "Darkness");
        assert_eq!(raw.sex_of_driver, 1);
        assert_eq!(raw.vehicle_type, 10);
        assert_eq!(raw.speed_limit, 120);
        assert_eq!(raw.road_type, 1);

        let text = output(session);
        assert!(text.contains("Please choose one of"));
        assert!(text.contains("between 20 and 120"));
    }

    #[test]
    fn exit_and_end_of_input_stop_collection() {
        assert_eq!(session("Monday\nexit\n").collect().unwrap(), None);
        assert_eq!(session("Monday\nDaylight\n0\n").collect().unwrap(), None);
    }

    #[test]
    fn failed_prediction_keeps_session_alive() {
        let mut classifier = MockClassifier::new();
        let mut calls = 0;
        classifier.expect_predict().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(PredictError::Internal("model exploded".to_string()))
            } else {
                Ok(vec![0])
            }
        });
        let predictor = Predictor::new(classifier);

        let one_round = "\n\n\n\n\n\n\n\n\n";
        let mut session = session(&format!("{one_round}{one_round}"));
        assert_eq!(session.run(&predictor).unwrap(), 1);

        let text = output(session);
        assert!(text.contains("⚠️ Prediction failed: model exploded"));
        assert!(text.contains("SLIGHT 😊"));
    }

    #[test]
    fn custom_default_speed_is_used() {
        let mut session =
            Session::new(Cursor::new(b"\n\n\n\n\n\n\n\n\n".to_vec()), Vec::new(), 80);
        let raw = session.collect().unwrap().unwrap();
        assert_eq!(raw.speed_limit, 80);
    }

    #[test]
    fn render_outcome_formats_both_halves() {
        let ok = render_outcome(&Ok(Prediction {
            class_id: 1,
            label: SeverityLabel::Serious,
        }));
        assert!(ok.starts_with("Predicted Accident Severity: SERIOUS 😟"));
        assert!(ok.contains("942799.png"));

        let err = render_outcome(&Err(PredictionFailure::EmptyOutput));
        assert_eq!(err, "⚠️ Prediction failed: Classifier returned no prediction");
    }

    #[test]
    fn missing_model_message_names_the_file() {
        let path = Path::new("accident_model.msgpack");
        let err = ModelLoadError::NotFound(PathBuf::from(path));
        assert_eq!(
            model_load_message(path, &err),
            "❌ Model file not found! Please make sure 'accident_model.msgpack' exists."
        );

        let err = ModelLoadError::Incompatible("bad width".to_string());
        assert!(model_load_message(path, &err).starts_with("❌ Failed to load model:"));
    }

    #[test]
    fn unavailable_dataset_gives_a_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accidents_india.csv");
        assert!(insights_section(&path).starts_with("⚠️ Dataset not found or invalid"));

        std::fs::write(&path, "Day_of_Week\nFriday\n").unwrap();
        assert!(insights_section(&path).starts_with("⚠️ Dataset not found or invalid"));
    }

    #[test]
    fn available_dataset_gives_the_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accidents_india.csv");
        std::fs::write(
            &path,
            "Day_of_Week,Accident_Severity,Speed_limit,Road_Type,Light_Conditions\n\
             Friday,Fatal,100,Single carriageway,Darkness\n",
        )
        .unwrap();
        assert!(insights_section(&path).starts_with("📊 Data Insights (1 records)"));
    }
}
