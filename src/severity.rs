use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable accident severity derived from a predicted class id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityLabel {
    Slight,
    Serious,
    Fatal,
    Unknown,
}

impl SeverityLabel {
    /// Maps a class id with the fixed `{0: Slight, 1: Serious, 2: Fatal}`
    /// table. Ids outside it become `Unknown` instead of an error.
    pub fn from_class_id(class_id: usize) -> Self {
        match class_id {
            0 => SeverityLabel::Slight,
            1 => SeverityLabel::Serious,
            2 => SeverityLabel::Fatal,
            _ => SeverityLabel::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SeverityLabel::Slight => "Slight",
            SeverityLabel::Serious => "Serious",
            SeverityLabel::Fatal => "Fatal",
            SeverityLabel::Unknown => "Unknown",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SeverityLabel::Slight => "😊",
            SeverityLabel::Serious => "😟",
            SeverityLabel::Fatal | SeverityLabel::Unknown => "🚨",
        }
    }

    pub fn image_url(self) -> &'static str {
        match self {
            SeverityLabel::Slight => "https://cdn-icons-png.flaticon.com/512/1048/1048310.png",
            SeverityLabel::Serious => "https://cdn-icons-png.flaticon.com/512/942/942799.png",
            SeverityLabel::Fatal | SeverityLabel::Unknown => {
                "https://cdn-icons-png.flaticon.com/512/564/564619.png"
            }
        }
    }
}

impl fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
