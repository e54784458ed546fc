use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// The fixed set of product form fields, named as the form knows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "image_url")]
    ImageUrl,
    #[serde(rename = "quantity")]
    Quantity,
    #[serde(rename = "categoryId")]
    CategoryId,
    #[serde(rename = "isActive")]
    IsActive,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Description,
        Field::Price,
        Field::ImageUrl,
        Field::Quantity,
        Field::CategoryId,
        Field::IsActive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Price => "price",
            Field::ImageUrl => "image_url",
            Field::Quantity => "quantity",
            Field::CategoryId => "categoryId",
            Field::IsActive => "isActive",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Name | Field::Description | Field::ImageUrl => FieldKind::Text,
            Field::Price => FieldKind::Number,
            Field::Quantity | Field::CategoryId => FieldKind::Integer,
            Field::IsActive => FieldKind::Bool,
        }
    }

    pub fn default_value(self) -> FieldValue {
        match self.kind() {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Number => FieldValue::Number(Some(0.0)),
            FieldKind::Integer => FieldValue::Integer(Some(0)),
            FieldKind::Bool => FieldValue::Bool(true),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| AppError::invalid_input(format!("unknown field '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    Bool,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Bool => "boolean",
        };
        f.write_str(name)
    }
}

/// Current value of a control. Numeric inputs that could not be read hold
/// `None`, which the `required` rule reports.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Option<f64>),
    Integer(Option<i64>),
    Bool(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Bool(_) => FieldKind::Bool,
        }
    }

    /// Reads raw text the way an input control would: blank or unparsable
    /// numbers become empty values instead of errors.
    pub fn parse(kind: FieldKind, raw: &str) -> AppResult<FieldValue> {
        let trimmed = raw.trim();
        let value = match kind {
            FieldKind::Text => FieldValue::Text(raw.to_string()),
            FieldKind::Number => {
                FieldValue::Number(trimmed.parse::<f64>().ok().filter(|n| n.is_finite()))
            }
            FieldKind::Integer => FieldValue::Integer(trimmed.parse::<i64>().ok()),
            FieldKind::Bool => match trimmed {
                "true" | "on" | "1" => FieldValue::Bool(true),
                "false" | "off" | "0" | "" => FieldValue::Bool(false),
                other => {
                    return Err(AppError::invalid_input(format!(
                        "'{other}' is not a boolean"
                    )))
                }
            },
        };
        Ok(value)
    }

    /// Converts a JSON input value for a field of the given kind.
    pub fn from_json(kind: FieldKind, value: &Value) -> AppResult<FieldValue> {
        let converted = match (kind, value) {
            (FieldKind::Text, Value::String(s)) => FieldValue::Text(s.clone()),
            (FieldKind::Number, Value::Number(n)) => FieldValue::Number(n.as_f64()),
            (FieldKind::Integer, Value::Number(n)) => FieldValue::Integer(Some(whole(n)?)),
            (FieldKind::Number | FieldKind::Integer, Value::Null) => match kind {
                FieldKind::Number => FieldValue::Number(None),
                _ => FieldValue::Integer(None),
            },
            (FieldKind::Bool, Value::Bool(b)) => FieldValue::Bool(*b),
            (_, Value::String(s)) => FieldValue::parse(kind, s)?,
            (kind, other) => {
                return Err(AppError::invalid_input(format!(
                    "expected a {kind} value, got {other}"
                )))
            }
        };
        Ok(converted)
    }
}

/// Accepts `5` and `5.0`; rejects fractions and values outside `i64`.
fn whole(n: &serde_json::Number) -> AppResult<i64> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(AppError::invalid_input(format!("{n} is not a whole number"))),
    }
}

/// One control of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldControl {
    pub value: FieldValue,
    pub touched: bool,
    pub dirty: bool,
}

impl FieldControl {
    pub fn new(value: FieldValue) -> Self {
        Self { value, touched: false, dirty: false }
    }
}
