use std::{borrow::Cow, collections::BTreeSet};

use serde_json::Value;

/// Per-set values as found in stored records.
///
/// Older app versions wrote these fields as arrays, as JSON text or as a
/// single value, and some records lack them entirely.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum SetData {
    Sequence(Vec<Value>),
    EncodedSequence(String),
    Scalar(Value),
    #[default]
    Absent,
}

impl From<Value> for SetData {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => SetData::Sequence(values),
            Value::String(text) => SetData::EncodedSequence(text),
            Value::Number(_) => SetData::Scalar(value),
            Value::Null | Value::Bool(_) | Value::Object(_) => SetData::Absent,
        }
    }
}

impl From<Option<Value>> for SetData {
    fn from(value: Option<Value>) -> Self {
        value.map_or(SetData::Absent, SetData::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    Weight,
    Reps,
    Difficulty,
}

pub const DEFAULT_WEIGHT: f64 = 0.0;
pub const DEFAULT_REPS: f64 = 10.0;
pub const DEFAULT_DURATION: f64 = 30.0;

impl SetKind {
    fn policy(self, is_bodyweight: bool) -> SetPolicy {
        match self {
            SetKind::Weight => SetPolicy {
                unit: "lbs",
                empty_message: "No weight recorded",
                accept: finite_number,
                default: Some(DEFAULT_WEIGHT),
                accepts_bare_text: false,
            },
            SetKind::Reps if is_bodyweight => SetPolicy {
                unit: "seconds",
                empty_message: "No duration recorded",
                accept: finite_number,
                default: Some(DEFAULT_DURATION),
                accepts_bare_text: false,
            },
            SetKind::Reps => SetPolicy {
                unit: "reps",
                empty_message: "No reps recorded",
                accept: finite_number,
                default: Some(DEFAULT_REPS),
                accepts_bare_text: false,
            },
            SetKind::Difficulty => SetPolicy {
                unit: "",
                empty_message: "No effort recorded",
                accept: label,
                default: None,
                accepts_bare_text: true,
            },
        }
    }
}

struct SetPolicy {
    unit: &'static str,
    empty_message: &'static str,
    accept: fn(&Value) -> Option<SetValue>,
    /// Shown when values were recorded but none of them is usable.
    default: Option<f64>,
    /// Text that is not JSON counts as one value instead of none.
    accepts_bare_text: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum SetValue {
    Number(f64),
    Label(String),
}

fn finite_number(value: &Value) -> Option<SetValue> {
    value
        .as_f64()
        .filter(|number| number.is_finite())
        .map(SetValue::Number)
}

/// Surrounding whitespace is not part of a label; blank labels count as not
/// recorded.
fn label(value: &Value) -> Option<SetValue> {
    let text = match value {
        Value::Null => return None,
        Value::String(text) => text.trim().to_string(),
        _ => value.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(SetValue::Label(text))
    }
}

/// Renders the values of one per-set field for display.
///
/// Never fails: unusable data degrades to a default value or to a
/// "not recorded" message.
#[must_use]
pub fn normalize(raw: &SetData, kind: SetKind, is_bodyweight: bool) -> String {
    let policy = kind.policy(is_bodyweight);
    let values = coerce(raw, policy.accepts_bare_text);

    if values.is_empty() {
        return policy.empty_message.to_string();
    }

    let mut accepted = values.iter().filter_map(policy.accept).collect::<Vec<_>>();

    if accepted.is_empty() {
        match policy.default {
            Some(default) => accepted.push(SetValue::Number(default)),
            None => return policy.empty_message.to_string(),
        }
    }

    aggregate(accepted, policy.unit)
}

fn coerce(raw: &SetData, accepts_bare_text: bool) -> Cow<'_, [Value]> {
    match raw {
        SetData::Sequence(values) => Cow::Borrowed(values),
        SetData::Scalar(value) => Cow::Owned(vec![value.clone()]),
        SetData::EncodedSequence(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(values)) => Cow::Owned(values),
            Ok(Value::Null) => Cow::Owned(vec![]),
            Ok(value) => Cow::Owned(vec![value]),
            Err(_) if accepts_bare_text && !text.trim().is_empty() => {
                Cow::Owned(vec![Value::String(text.clone())])
            }
            Err(_) => Cow::Owned(vec![]),
        },
        SetData::Absent => Cow::Owned(vec![]),
    }
}

fn aggregate(values: Vec<SetValue>, unit: &str) -> String {
    let mut numbers = vec![];
    let mut labels = BTreeSet::new();

    for value in values {
        match value {
            SetValue::Number(number) => numbers.push(number),
            SetValue::Label(label) => {
                labels.insert(label);
            }
        }
    }

    if !labels.is_empty() {
        let labels = labels.into_iter().collect::<Vec<_>>();
        return with_unit(&labels.join(", "), unit);
    }

    numbers.sort_by(f64::total_cmp);
    numbers.dedup();

    match (numbers.first(), numbers.last()) {
        (Some(min), Some(max)) if numbers.len() > 1 => {
            with_unit(&format!("{} - {}", number(*min), number(*max)), unit)
        }
        (Some(value), _) => with_unit(&number(*value), unit),
        _ => String::new(),
    }
}

#[allow(clippy::float_cmp)]
fn number(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    value.to_string()
}

fn with_unit(text: &str, unit: &str) -> String {
    if unit.is_empty() {
        text.to_string()
    } else {
        format!("{text} {unit}")
    }
}
