//! Field-level checking of an untyped request body against the
//! [`WorkoutLog`] shape. Every offending field is reported, not just the
//! first one serde would trip over.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::Display;

use crate::models::WorkoutLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldErrorKind {
    Missing,
    StringType,
    FloatType,
    IntType,
    ModelType,
    JsonInvalid,
}

impl FieldErrorKind {
    fn message(self) -> &'static str {
        match self {
            FieldErrorKind::Missing => "Field required",
            FieldErrorKind::StringType => "Input should be a valid string",
            FieldErrorKind::FloatType => "Input should be a valid number",
            FieldErrorKind::IntType => "Input should be a valid integer",
            FieldErrorKind::ModelType => {
                "Input should be a valid dictionary or object to extract fields from"
            }
            FieldErrorKind::JsonInvalid => "JSON decode error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: Option<&str>, kind: FieldErrorKind) -> Self {
        let mut loc = vec!["body".to_string()];
        if let Some(field) = field {
            loc.push(field.to_string());
        }
        Self {
            loc,
            msg: kind.message().to_string(),
            kind,
        }
    }

    /// Body could not be parsed as JSON at all.
    pub fn json_invalid(detail: impl std::fmt::Display) -> Self {
        let mut err = Self::new(None, FieldErrorKind::JsonInvalid);
        err.msg = format!("{}: {}", err.msg, detail);
        err
    }

    pub fn field(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

pub fn validate_log(value: &Value) -> Result<WorkoutLog, Vec<FieldError>> {
    let Some(body) = value.as_object() else {
        return Err(vec![FieldError::new(None, FieldErrorKind::ModelType)]);
    };

    let mut errors = Vec::new();

    let date = required_string(body, "date", &mut errors);
    let kind = required_string(body, "type", &mut errors);
    let weight = required(body, "weight", &mut errors).and_then(|v| match v.as_f64() {
        Some(w) => Some(w),
        None => {
            errors.push(FieldError::new(Some("weight"), FieldErrorKind::FloatType));
            None
        }
    });
    let reps = required(body, "reps", &mut errors).and_then(|v| match as_integer(v) {
        Some(r) => Some(r),
        None => {
            errors.push(FieldError::new(Some("reps"), FieldErrorKind::IntType));
            None
        }
    });
    let notes = optional_string(body, "notes", &mut errors);
    let photo = optional_string(body, "photo", &mut errors);

    match (date, kind, weight, reps) {
        (Some(date), Some(kind), Some(weight), Some(reps)) if errors.is_empty() => Ok(WorkoutLog {
            date,
            kind,
            weight,
            reps,
            notes,
            photo,
        }),
        _ => Err(errors),
    }
}

fn required<'a>(body: &'a Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<&'a Value> {
    match body.get(field) {
        None => {
            errors.push(FieldError::new(Some(field), FieldErrorKind::Missing));
            None
        }
        Some(v) => Some(v),
    }
}

fn required_string(body: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let value = required(body, field, errors)?;
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            errors.push(FieldError::new(Some(field), FieldErrorKind::StringType));
            None
        }
    }
}

fn optional_string(body: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(Some(field), FieldErrorKind::StringType));
            None
        }
    }
}

// Whole-valued floats such as `5.0` count as integers.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
