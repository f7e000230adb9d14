//! Encoding of user selections into the fixed-order feature vector the
//! severity model was trained on.

use crate::error::EncodeError;
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

/// Column names in training order. The artifact compares its own stored
/// order against this list on every prediction.
pub const COLUMNS: [&str; 9] = [
    "Day_of_Week",
    "Light_Conditions",
    "Sex_Of_Driver",
    "Vehicle_Type",
    "Speed_limit",
    "Pedestrian_Crossing",
    "Road_Type",
    "Special_Conditions_at_Site",
    "Number_of_Pasengers",
];

/// Inclusive bounds and default of one numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    pub min: u16,
    pub max: u16,
    pub default: u16,
}

impl FieldRange {
    const fn new(min: u16, max: u16) -> Self {
        Self {
            min,
            max,
            default: min,
        }
    }

    pub fn contains(&self, value: u16) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn with_default(self, default: u16) -> Self {
        Self { default, ..self }
    }
}

pub const SEX_OF_DRIVER: FieldRange = FieldRange::new(0, 1);
pub const VEHICLE_TYPE: FieldRange = FieldRange::new(0, 10);
pub const SPEED_LIMIT: FieldRange = FieldRange {
    min: 20,
    max: 120,
    default: 40,
};
pub const PEDESTRIAN_CROSSING: FieldRange = FieldRange::new(0, 5);
pub const ROAD_TYPE: FieldRange = FieldRange::new(1, 6);
pub const SPECIAL_CONDITIONS: FieldRange = FieldRange::new(0, 3);
pub const NUMBER_OF_PASSENGERS: FieldRange = FieldRange::new(1, 10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Encoded value, Monday=1 through Sunday=7.
    pub fn number(self) -> u8 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl FromStr for Weekday {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EncodeError::InvalidInput {
                field: "day_of_week",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightCondition {
    Daylight,
    Darkness,
}

impl LightCondition {
    pub const ALL: [LightCondition; 2] = [LightCondition::Daylight, LightCondition::Darkness];

    pub fn number(self) -> u8 {
        match self {
            LightCondition::Daylight => 0,
            LightCondition::Darkness => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LightCondition::Daylight => "Daylight",
            LightCondition::Darkness => "Darkness",
        }
    }
}

impl FromStr for LightCondition {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        LightCondition::ALL
            .into_iter()
            .find(|light| light.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| EncodeError::InvalidInput {
                field: "light_conditions",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for LightCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selections as they come from the input surface, before encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSelections {
    pub day: String,
    pub light: String,
    pub sex_of_driver: u8,
    pub vehicle_type: u8,
    pub speed_limit: u16,
    pub pedestrian_crossing: u8,
    pub road_type: u8,
    pub special_conditions: u8,
    pub number_of_passengers: u8,
}

/// One prediction request, encoded in training column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureVector {
    pub day_of_week: u8,
    pub light_conditions: u8,
    pub sex_of_driver: u8,
    pub vehicle_type: u8,
    pub speed_limit: u16,
    pub pedestrian_crossing: u8,
    pub road_type: u8,
    pub special_conditions: u8,
    pub number_of_passengers: u8,
}

impl FeatureVector {
    /// Values in `COLUMNS` order.
    pub fn values(&self) -> [f64; 9] {
        [
            f64::from(self.day_of_week),
            f64::from(self.light_conditions),
            f64::from(self.sex_of_driver),
            f64::from(self.vehicle_type),
            f64::from(self.speed_limit),
            f64::from(self.pedestrian_crossing),
            f64::from(self.road_type),
            f64::from(self.special_conditions),
            f64::from(self.number_of_passengers),
        ]
    }

    /// Builds the single-row table handed to a classifier.
    pub fn to_table(&self) -> FeatureTable {
        let row = self.values();
        let values = Array2::from_shape_fn((1, COLUMNS.len()), |(_, j)| row[j]);
        FeatureTable {
            columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
            values,
        }
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {}, {}, {}, {})",
            self.day_of_week,
            self.light_conditions,
            self.sex_of_driver,
            self.vehicle_type,
            self.speed_limit,
            self.pedestrian_crossing,
            self.road_type,
            self.special_conditions,
            self.number_of_passengers
        )
    }
}

/// Tabular records with named columns, one row per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub columns: Vec<String>,
    pub values: Array2<f64>,
}

/// Encodes raw selections. Only the two categorical fields can fail; the
/// numeric ones are range-checked by whatever collected them.
pub fn encode(raw: &RawSelections) -> Result<FeatureVector, EncodeError> {
    let day: Weekday = raw.day.parse()?;
    let light: LightCondition = raw.light.parse()?;

    Ok(FeatureVector {
        day_of_week: day.number(),
        light_conditions: light.number(),
        sex_of_driver: raw.sex_of_driver,
        vehicle_type: raw.vehicle_type,
        speed_limit: raw.speed_limit,
        pedestrian_crossing: raw.pedestrian_crossing,
        road_type: raw.road_type,
        special_conditions: raw.special_conditions,
        number_of_passengers: raw.number_of_passengers,
    })
}
