//! Summaries of the accident dataset: the counts and speed-limit
//! distributions shown under the prediction form.

use crate::error::DatasetError;
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// The dataset columns the insights read. Any other columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AccidentRecord {
    #[serde(rename = "Day_of_Week")]
    pub day_of_week: String,
    #[serde(rename = "Accident_Severity")]
    pub accident_severity: String,
    #[serde(rename = "Speed_limit")]
    pub speed_limit: Option<f64>,
    #[serde(rename = "Road_Type")]
    pub road_type: String,
    #[serde(rename = "Light_Conditions")]
    pub light_conditions: String,
}

/// Counts of accidents per category, split by severity. Categories and
/// severities keep the order they first appear in the data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossTab {
    categories: Vec<String>,
    severities: Vec<String>,
    counts: HashMap<(usize, usize), usize>,
}

fn position_or_push(values: &mut Vec<String>, value: &str) -> usize {
    match values.iter().position(|v| v == value) {
        Some(i) => i,
        None => {
            values.push(value.to_string());
            values.len() - 1
        }
    }
}

impl CrossTab {
    fn add(&mut self, category: &str, severity: &str) {
        let c = position_or_push(&mut self.categories, category);
        let s = position_or_push(&mut self.severities, severity);
        *self.counts.entry((c, s)).or_insert(0) += 1;
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn severities(&self) -> &[String] {
        &self.severities
    }

    pub fn count(&self, category: &str, severity: &str) -> usize {
        let c = self.categories.iter().position(|v| v == category);
        let s = self.severities.iter().position(|v| v == severity);
        match (c, s) {
            (Some(c), Some(s)) => self.counts.get(&(c, s)).copied().unwrap_or(0),
            _ => 0,
        }
    }

    fn render(&self, title: &str, out: &mut String) {
        let width = self
            .categories
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(title.len());

        out.push_str(&format!("{:<width$}", title));
        for severity in &self.severities {
            out.push_str(&format!(" | {:>8}", severity));
        }
        out.push('\n');

        for category in &self.categories {
            out.push_str(&format!("{:<width$}", category));
            for severity in &self.severities {
                out.push_str(&format!(" | {:>8}", self.count(category, severity)));
            }
            out.push('\n');
        }
    }
}

/// Five-number summary of a sample, quartiles linearly interpolated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl SpeedSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Aggregates of the accident dataset.
#[derive(Debug, Clone)]
pub struct Insights {
    pub rows: usize,
    pub by_day_of_week: CrossTab,
    pub speed_by_severity: Vec<(String, SpeedSummary)>,
    pub by_road_type: CrossTab,
    pub by_light_conditions: CrossTab,
}

impl Insights {
    /// Loads the dataset CSV and aggregates it.
    pub fn from_csv(path: &Path) -> Result<Self, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }
        let insights = Self::from_records(csv::Reader::from_path(path)?.deserialize())?;
        info!("Loaded {} accident records from {:?}", insights.rows, path);
        Ok(insights)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        Self::from_records(csv::Reader::from_reader(reader).deserialize())
    }

    fn from_records(
        records: impl Iterator<Item = Result<AccidentRecord, csv::Error>>,
    ) -> Result<Self, DatasetError> {
        let mut rows = 0;
        let mut by_day_of_week = CrossTab::default();
        let mut by_road_type = CrossTab::default();
        let mut by_light_conditions = CrossTab::default();
        let mut speeds: Vec<(String, Vec<f64>)> = Vec::new();

        for result in records {
            let record = result?;
            rows += 1;

            let severity = record.accident_severity.as_str();
            by_day_of_week.add(&record.day_of_week, severity);
            by_road_type.add(&record.road_type, severity);
            by_light_conditions.add(&record.light_conditions, severity);

            if let Some(speed) = record.speed_limit {
                match speeds.iter_mut().find(|(s, _)| s == severity) {
                    Some((_, values)) => values.push(speed),
                    None => speeds.push((severity.to_string(), vec![speed])),
                }
            }
        }

        if rows == 0 {
            return Err(DatasetError::Empty);
        }
        debug!("Aggregated {} rows into insights", rows);

        let speed_by_severity = speeds
            .into_iter()
            .filter_map(|(severity, values)| {
                SpeedSummary::from_values(&values).map(|summary| (severity, summary))
            })
            .collect();

        Ok(Self {
            rows,
            by_day_of_week,
            speed_by_severity,
            by_road_type,
            by_light_conditions,
        })
    }

    /// Plain-text report of all four summaries.
    pub fn render(&self) -> String {
        let mut out = format!("📊 Data Insights ({} records)\n\n", self.rows);

        out.push_str("Accidents by Day of Week\n");
        self.by_day_of_week.render("Day_of_Week", &mut out);

        out.push_str("\nEffect of Speed Limit on Severity\n");
        out.push_str(&format!(
            "{:<12} | {:>6} | {:>6} | {:>6} | {:>6} | {:>6} | {:>6}\n",
            "Severity", "count", "min", "q1", "median", "q3", "max"
        ));
        for (severity, s) in &self.speed_by_severity {
            out.push_str(&format!(
                "{:<12} | {:>6} | {:>6.1} | {:>6.1} | {:>6.1} | {:>6.1} | {:>6.1}\n",
                severity, s.count, s.min, s.q1, s.median, s.q3, s.max
            ));
        }

        out.push_str("\nRoad Type vs Severity\n");
        self.by_road_type.render("Road_Type", &mut out);

        out.push_str("\nLight Conditions Effect\n");
        self.by_light_conditions.render("Light_Conditions", &mut out);

        out
    }
}
