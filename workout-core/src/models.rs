use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One exercise entry as stored on disk and returned over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub weight: f64,
    pub reps: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl WorkoutLog {
    pub fn new(date: impl Into<String>, kind: impl Into<String>, weight: f64, reps: i64) -> Self {
        Self {
            date: date.into(),
            kind: kind.into(),
            weight,
            reps,
            notes: None,
            photo: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }
}

/// Username -> logs, in the order users were first written.
pub type Document = IndexMap<String, Vec<WorkoutLog>>;

/// What to do when the data file exists but does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MalformedPolicy {
    /// Treat the file as empty. The next write replaces it.
    #[default]
    Discard,
    /// Refuse to serve from the file until it is repaired.
    Reject,
}
